//! scrape command: walk every configured league and export the results.
//!
//! One browser session serves the whole run. Leagues are visited in
//! configured order, matches strictly one at a time with a politeness
//! pause between detail fetches. A bad match or a dead listing is
//! skipped; the export only goes missing when the whole run came back
//! empty.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::browser::Session;
use crate::config::ScrapeConfig;
use crate::detail;
use crate::export;
use crate::listing;
use crate::schema::LeagueRecords;

#[derive(Args)]
pub struct ScrapeArgs {
    /// League/bookmaker configuration file (YAML); built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Workbook output path
    #[arg(short, long, default_value = "odds.xlsx")]
    pub output: PathBuf,

    /// Fixture-list output path
    #[arg(long, default_value = "matches.txt")]
    pub matchlist: PathBuf,

    /// Listing-page readiness timeout in milliseconds
    #[arg(long, default_value = "20000")]
    pub timeout: u64,

    /// Match-page readiness timeout in milliseconds
    #[arg(long, default_value = "15000")]
    pub detail_timeout: u64,

    /// Pause between match-page fetches in milliseconds
    #[arg(long, default_value = "1000")]
    pub delay: u64,

    /// Run with a visible browser window
    #[arg(long)]
    pub headed: bool,
}

/// Timing and browser knobs for one run, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub listing_timeout: Duration,
    pub detail_timeout: Duration,
    pub pacer: Pacer,
    pub headed: bool,
}

/// Fixed-delay pacing between detail-page fetches.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn fixed(delay: Duration) -> Self {
        Pacer { delay }
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

pub async fn run_scrape(args: ScrapeArgs) -> Result<()> {
    let config = ScrapeConfig::load(args.config.as_deref()).await?;
    let options = RunOptions {
        listing_timeout: Duration::from_millis(args.timeout),
        detail_timeout: Duration::from_millis(args.detail_timeout),
        pacer: Pacer::fixed(Duration::from_millis(args.delay)),
        headed: args.headed,
    };

    let datasets = scrape(&config, &options).await?;

    if datasets.is_empty() {
        warn!("no data was scraped; output files not created");
        return Ok(());
    }

    export::write_workbook(&args.output, &datasets, &config)?;
    export::write_matchlist(&args.matchlist, &datasets).await?;

    let matches: usize = datasets.iter().map(|dataset| dataset.records.len()).sum();
    info!(leagues = datasets.len(), matches, "scrape complete");
    Ok(())
}

/// Run the collection pipeline against every configured league with one
/// shared browser session. The browser is closed before the result is
/// returned, whatever was collected.
pub async fn scrape(config: &ScrapeConfig, options: &RunOptions) -> Result<Vec<LeagueRecords>> {
    info!(
        leagues = config.leagues.len(),
        bookmakers = %config.bookmakers.join(", "),
        markets = %config
            .bet_types
            .iter()
            .map(|bet| bet.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        "starting scrape"
    );

    let mut session = Session::launch(options.headed).await?;
    let datasets = collect(&mut session, config, options).await;
    session.close().await.context("browser teardown failed")?;
    Ok(datasets)
}

/// League loop. Never fails: per-league and per-match errors are logged
/// and skipped, and whatever was gathered flows on to export.
async fn collect(
    session: &mut Session,
    config: &ScrapeConfig,
    options: &RunOptions,
) -> Vec<LeagueRecords> {
    let mut datasets = Vec::new();
    for league in &config.leagues {
        info!(league = %league.name, url = %league.url, "scraping league");
        let references = match listing::list_matches(
            session,
            &league.url,
            &config.base_url,
            options.listing_timeout,
        )
        .await
        {
            Ok(references) => references,
            Err(e) => {
                warn!(league = %league.name, error = %e, "listing failed; skipping league");
                continue;
            }
        };
        if references.is_empty() {
            warn!(league = %league.name, "no matches listed; skipping league");
            continue;
        }
        info!(league = %league.name, matches = references.len(), "match references collected");

        let mut records = Vec::new();
        for reference in references {
            let Some(url) = reference.url else {
                debug!(home = %reference.home, away = %reference.away, "no detail link; skipping");
                continue;
            };
            if let Some(record) =
                detail::parse_match(session, &url, options.detail_timeout).await
            {
                records.push(record);
            }
            options.pacer.pause().await;
        }
        info!(league = %league.name, parsed = records.len(), "league done");
        datasets.push(LeagueRecords {
            league: league.name.clone(),
            records,
        });
    }
    datasets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pacer_zero_delay_returns_immediately() {
        let pacer = Pacer::fixed(Duration::ZERO);
        let start = std::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_pacer_waits_out_delay() {
        let pacer = Pacer::fixed(Duration::from_millis(50));
        let start = std::time::Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}

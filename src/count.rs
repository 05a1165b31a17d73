//! count command: offline audit of a saved listing page.
//!
//! Takes an HTML file captured from a league listing and reports the
//! unique matches it contains, without touching the browser. Handy for
//! checking selector drift against a snapshot before a full run.

use anyhow::{Context, Result};
use clap::Args;
use scraper::Html;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::config::DEFAULT_BASE_URL;
use crate::listing;

#[derive(Args)]
pub struct CountArgs {
    /// Saved listing-page HTML file
    pub file: PathBuf,

    /// Site origin used to resolve the rows' detail links
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

pub async fn run_count(args: CountArgs) -> Result<()> {
    let html = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let doc = Html::parse_document(&html);
    let rows = listing::match_rows(&doc, &args.base_url);

    let unique: BTreeSet<(&str, &str)> = rows
        .iter()
        .map(|reference| (reference.home.as_str(), reference.away.as_str()))
        .collect();

    println!("Total unique matches: {}", unique.len());
    for (index, (home, away)) in unique.iter().enumerate() {
        println!("{}. {} vs {}", index + 1, home, away);
    }
    Ok(())
}

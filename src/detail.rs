//! Match detail pages: the embedded event payload plus the bookmaker
//! comparison table.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

use crate::browser::Session;
use crate::error::{Result, ScrapeError};
use crate::payload;
use crate::schema::{MatchRecord, OddsQuote, Outcome};

/// Readiness marker: the event header has rendered.
const EVENT_HEADER: &str = "#react-event-header";
const BOOKMAKER_ROW: &str = r#"div[data-testid="over-under-expanded-row"]"#;
const BOOKMAKER_NAME: &str = r#"p[data-testid="outrights-expanded-bookmaker-name"]"#;
const ODDS_CELL: &str = r#"div[data-testid="odd-container"]"#;

/// Fetch and parse one match page. Failures are logged and turn into
/// None so a single bad page never sinks the league.
pub async fn parse_match(
    session: &mut Session,
    url: &str,
    timeout: Duration,
) -> Option<MatchRecord> {
    match fetch_match(session, url, timeout).await {
        Ok(record) => {
            debug!(home = %record.home, away = %record.away, bookmakers = record.odds.len(), "match parsed");
            Some(record)
        }
        Err(e) => {
            warn!(url, error = %e, "skipping match");
            None
        }
    }
}

async fn fetch_match(session: &mut Session, url: &str, timeout: Duration) -> Result<MatchRecord> {
    let html = session
        .render(url, EVENT_HEADER, timeout, Duration::ZERO)
        .await?;
    parse_document(&Html::parse_document(&html), url)
}

/// Parse an already-rendered match document.
pub fn parse_document(doc: &Html, url: &str) -> Result<MatchRecord> {
    let blob = Selector::parse(EVENT_HEADER)
        .ok()
        .and_then(|sel| doc.select(&sel).next())
        .and_then(|el| el.value().attr("data"))
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(ScrapeError::MissingPayload)?;
    let event = payload::decode(blob)?;

    let mut odds = BTreeMap::new();
    if let Ok(row_sel) = Selector::parse(BOOKMAKER_ROW) {
        for row in doc.select(&row_sel) {
            if let Some((bookmaker, quotes)) = bookmaker_row(&row) {
                debug!(bookmaker = %bookmaker, quotes = ?quotes, "odds row extracted");
                odds.insert(bookmaker, quotes);
            }
        }
    }

    Ok(MatchRecord {
        date: event.event_body.start_date.and_then(payload::format_kickoff),
        home: event.event_data.home.unwrap_or_default(),
        away: event.event_data.away.unwrap_or_default(),
        odds,
        url: url.to_string(),
    })
}

/// One bookmaker row of the comparison table: its name and the first
/// three odds values, in outcome order. Rows without a name or with
/// fewer than three values are dropped.
fn bookmaker_row(row: &ElementRef) -> Option<(String, Vec<OddsQuote>)> {
    let name_sel = Selector::parse(BOOKMAKER_NAME).ok()?;
    let name = row
        .select(&name_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())?;

    let cell_sel = Selector::parse(ODDS_CELL).ok()?;
    let value_sel = Selector::parse("p").ok()?;
    let prices: Vec<String> = row
        .select(&cell_sel)
        .filter_map(|cell| cell.select(&value_sel).next())
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|price| !price.is_empty())
        .collect();
    if prices.len() < 3 {
        debug!(bookmaker = %name, values = prices.len(), "dropping incomplete odds row");
        return None;
    }

    let quotes = Outcome::SLOTS
        .iter()
        .zip(&prices)
        .map(|(slot, price)| OddsQuote {
            outcome: *slot,
            price: price.clone(),
        })
        .collect();
    Some((name, quotes))
}

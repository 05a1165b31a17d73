//! League listing pages: match rows, participant names, detail links and
//! pagination depth.

use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::browser::Session;
use crate::error::Result;
use crate::schema::MatchReference;

/// Readiness marker: the listing has rendered at least one event row.
const READY_MARKER: &str = "div.eventRow";
const MATCH_ROW: &str = r#"div[data-testid="game-row"]"#;
const PARTICIPANT: &str = "p.participant-name";
const PAGE_LINK: &str = "a[data-number]";

/// Rows keep streaming in after the first one renders; give them a moment.
const LISTING_SETTLE: Duration = Duration::from_secs(3);

/// Builds page-N variants of a league listing URL. Page 1 is the base URL
/// itself; deeper pages append the site's page fragment.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    base: String,
}

impl PageTemplate {
    pub fn new(base: &str) -> Self {
        PageTemplate {
            base: base.to_string(),
        }
    }

    pub fn page(&self, number: u32) -> String {
        if number <= 1 {
            self.base.clone()
        } else {
            format!("{}#/page/{}/", self.base, number)
        }
    }
}

/// Walk every page of a league listing and collect its match references,
/// in page order.
pub async fn list_matches(
    session: &mut Session,
    league_url: &str,
    base_url: &str,
    timeout: Duration,
) -> Result<Vec<MatchReference>> {
    let template = PageTemplate::new(league_url);

    let html = session
        .render(league_url, READY_MARKER, timeout, LISTING_SETTLE)
        .await?;
    let (mut references, pages) = {
        let doc = Html::parse_document(&html);
        (match_rows(&doc, base_url), page_count(&doc))
    };
    info!(pages, matches = references.len(), "first listing page extracted");

    for number in 2..=pages {
        let page_url = template.page(number);
        let html = session
            .render(&page_url, READY_MARKER, timeout, LISTING_SETTLE)
            .await?;
        let doc = Html::parse_document(&html);
        let found = match_rows(&doc, base_url);
        info!(page = number, matches = found.len(), "listing page extracted");
        references.extend(found);
    }

    Ok(references)
}

/// Highest page number advertised by the pagination strip, or 1 when the
/// listing fits on a single page and no strip is rendered.
pub fn page_count(doc: &Html) -> u32 {
    let Ok(selector) = Selector::parse(PAGE_LINK) else {
        return 1;
    };
    doc.select(&selector)
        .filter_map(|el| el.value().attr("data-number"))
        .filter_map(|number| number.parse::<u32>().ok())
        .max()
        .unwrap_or(1)
        .max(1)
}

/// Extract the match rows of one rendered listing page. Rows that do not
/// carry exactly two participant names are skipped; rows without a
/// qualifying link are kept with no URL.
pub fn match_rows(doc: &Html, base_url: &str) -> Vec<MatchReference> {
    let mut references = Vec::new();
    let (Ok(row_sel), Ok(name_sel)) = (Selector::parse(MATCH_ROW), Selector::parse(PARTICIPANT))
    else {
        return references;
    };

    for row in doc.select(&row_sel) {
        let names: Vec<String> = row
            .select(&name_sel)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if names.len() != 2 {
            debug!(participants = names.len(), "skipping malformed listing row");
            continue;
        }
        let url = detail_link(&row, base_url);
        references.push(MatchReference {
            home: names[0].clone(),
            away: names[1].clone(),
            url,
        });
    }
    references
}

/// First hyperlink in the row that looks like a match detail page.
fn detail_link(row: &ElementRef, base_url: &str) -> Option<String> {
    let anchor_sel = Selector::parse("a").ok()?;
    row.select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| resolve_match_href(base_url, href))
}

/// Resolve `href` against the site origin and keep it only if it points at
/// a match page: somewhere under the football section, with the
/// second-to-last path segment being a dashed team-pair slug. That shape
/// tells match pages apart from the country and league links that share
/// the row.
pub fn resolve_match_href(base_url: &str, href: &str) -> Option<String> {
    let absolute = if href.starts_with("http://") || href.starts_with("https://") {
        Url::parse(href).ok()?
    } else {
        Url::parse(base_url).ok()?.join(href).ok()?
    };

    let segments: Vec<&str> = absolute
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if !segments.contains(&"football") {
        return None;
    }
    let slug = segments.len().checked_sub(2).and_then(|i| segments.get(i))?;
    if slug.contains('-') {
        Some(absolute.to_string())
    } else {
        None
    }
}

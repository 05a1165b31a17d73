//! Core data model for the scrape pipeline.
//!
//! Listing pages produce [`MatchReference`]s, detail pages produce
//! [`MatchRecord`]s, and one [`LeagueRecords`] per configured league is
//! what the exporter consumes.

use std::collections::BTreeMap;
use std::fmt;

/// A match discovered on a listing page: the two participants and, when
/// the row carried a usable link, the absolute detail-page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReference {
    pub home: String,
    pub away: String,
    /// None when the row had no qualifying hyperlink.
    pub url: Option<String>,
}

/// The three 1X2 outcome slots, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    pub const SLOTS: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Column label used in the export ("1", "X", "2").
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Home => "1",
            Outcome::Draw => "X",
            Outcome::Away => "2",
        }
    }

    pub fn from_label(label: &str) -> Option<Outcome> {
        match label {
            "1" => Some(Outcome::Home),
            "X" => Some(Outcome::Draw),
            "2" => Some(Outcome::Away),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One quoted price for one outcome slot. Prices stay as the site
/// displayed them; nothing downstream does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsQuote {
    pub outcome: Outcome,
    pub price: String,
}

/// Everything extracted from a single match detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Kick-off rendered as `DD.MM.YYYY HH:MM`, local time. None when the
    /// page payload had no timestamp.
    pub date: Option<String>,
    pub home: String,
    pub away: String,
    /// Bookmaker name to its quoted outcome prices.
    pub odds: BTreeMap<String, Vec<OddsQuote>>,
    /// Detail page this record came from.
    pub url: String,
}

impl MatchRecord {
    /// Quoted price for a bookmaker/outcome pair, if that bookmaker was
    /// present on the page.
    pub fn price(&self, bookmaker: &str, outcome: Outcome) -> Option<&str> {
        self.odds
            .get(bookmaker)?
            .iter()
            .find(|quote| quote.outcome == outcome)
            .map(|quote| quote.price.as_str())
    }
}

/// All records scraped for one league, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueRecords {
    /// Display name, also the sheet label in the export.
    pub league: String,
    pub records: Vec<MatchRecord>,
}

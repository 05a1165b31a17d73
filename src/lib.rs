//! oddsgrab: football odds collection with headless Chrome
//!
//! Pipeline: league listing pages yield match references, match pages
//! yield dated records with bookmaker odds, and the records project into
//! a multi-sheet workbook.
//!
//! Commands:
//! - scrape: Collect configured leagues and write the workbook
//! - count: Audit a saved listing page offline
//! - init: Write a starter configuration file

pub mod browser;
pub mod config;
pub mod count;
pub mod detail;
pub mod error;
pub mod export;
pub mod init;
pub mod listing;
pub mod payload;
pub mod schema;
pub mod scrape;
pub mod table;

pub use config::{BetType, League, ScrapeConfig};
pub use error::ScrapeError;
pub use schema::{LeagueRecords, MatchRecord, MatchReference, OddsQuote, Outcome};
pub use scrape::{scrape, Pacer, RunOptions};

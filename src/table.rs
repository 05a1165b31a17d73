//! Wide-table projection: flattens match records into the rectangular
//! grid the workbook renders.
//!
//! Columns form a three-level hierarchy. The six base columns sit alone
//! on the top level; every configured market then contributes one block
//! of bookmaker x outcome columns. Missing data projects to an empty
//! cell, never to a missing cell, so every row has the same width.

use crate::config::ScrapeConfig;
use crate::schema::{MatchRecord, Outcome};

/// Leading columns shared by every sheet. The result columns are kept
/// for hand-entry after the matches are played.
pub const BASE_COLUMNS: [&str; 6] = [
    "Date",
    "Home Team",
    "Away Team",
    "Result full time",
    "Result 1st half",
    "Result 2nd half",
];

/// One column of the grid, identified by its three header levels. Base
/// columns leave the lower two levels empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnKey {
    pub top: String,
    pub mid: String,
    pub bottom: String,
}

impl ColumnKey {
    pub fn base(label: &str) -> Self {
        ColumnKey {
            top: label.to_string(),
            mid: String::new(),
            bottom: String::new(),
        }
    }

    pub fn odds(category: &str, bookmaker: &str, outcome: Outcome) -> Self {
        ColumnKey {
            top: category.to_string(),
            mid: bookmaker.to_string(),
            bottom: outcome.label().to_string(),
        }
    }

    /// Base columns span the full header height instead of nesting.
    pub fn is_base(&self) -> bool {
        self.mid.is_empty()
    }
}

/// A projected league: fixed columns plus one cell row per record.
/// Rectangular by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub columns: Vec<ColumnKey>,
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by column key, for tests and spot checks.
    pub fn cell(&self, row: usize, key: &ColumnKey) -> Option<&str> {
        let col = self.columns.iter().position(|candidate| candidate == key)?;
        self.rows.get(row).map(|cells| cells[col].as_str())
    }
}

/// The fixed column set a configuration produces: base columns, then
/// category x bookmaker x outcome in configured order.
pub fn columns(config: &ScrapeConfig) -> Vec<ColumnKey> {
    let mut columns: Vec<ColumnKey> = BASE_COLUMNS.iter().map(|label| ColumnKey::base(label)).collect();
    for bet in &config.bet_types {
        for bookmaker in &config.bookmakers {
            for outcome in Outcome::SLOTS {
                columns.push(ColumnKey::odds(&bet.category, bookmaker, outcome));
            }
        }
    }
    columns
}

/// Project records into the grid. A record missing a bookmaker, a price
/// or a date leaves those cells empty. No records means no table at all,
/// not even headers.
pub fn project(records: &[MatchRecord], config: &ScrapeConfig) -> WideTable {
    if records.is_empty() {
        return WideTable::default();
    }

    let columns = columns(config);
    let rows = records
        .iter()
        .map(|record| columns.iter().map(|column| cell_value(record, column)).collect())
        .collect();
    WideTable { columns, rows }
}

fn cell_value(record: &MatchRecord, column: &ColumnKey) -> String {
    if column.is_base() {
        return match column.top.as_str() {
            "Date" => record.date.clone().unwrap_or_default(),
            "Home Team" => record.home.clone(),
            "Away Team" => record.away.clone(),
            _ => String::new(),
        };
    }
    Outcome::from_label(&column.bottom)
        .and_then(|outcome| record.price(&column.mid, outcome))
        .map(str::to_string)
        .unwrap_or_default()
}

//! Workbook and fixture-list output.
//!
//! One sheet per league, a three-row merged header block, then one row
//! per match. Nothing is written at all when the run produced no data.

use anyhow::{Context, Result};
use regex::Regex;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::info;

use crate::config::ScrapeConfig;
use crate::schema::LeagueRecords;
use crate::table::{project, WideTable};

/// Header block height: category, bookmaker, outcome.
const HEADER_ROWS: u32 = 3;

/// Excel sheet names: max 31 chars, no `[ ] : * ? / \`.
pub fn sheet_name(label: &str) -> String {
    let forbidden = Regex::new(r"[\[\]:*?/\\]").unwrap();
    let cleaned = forbidden.replace_all(label, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return "Sheet".to_string();
    }
    cleaned.chars().take(31).collect()
}

/// Build the full workbook in memory, one sheet per league dataset.
pub fn build_workbook(
    datasets: &[LeagueRecords],
    config: &ScrapeConfig,
) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    for dataset in datasets {
        let table = project(&dataset.records, config);
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(&dataset.league))?;
        write_sheet(sheet, &table, &header)?;
    }
    Ok(workbook)
}

/// Write the workbook to disk.
pub fn write_workbook(
    path: &Path,
    datasets: &[LeagueRecords],
    config: &ScrapeConfig,
) -> Result<()> {
    let mut workbook =
        build_workbook(datasets, config).context("failed to assemble workbook")?;
    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(file = %path.display(), sheets = datasets.len(), "workbook written");
    Ok(())
}

fn write_sheet(
    sheet: &mut Worksheet,
    table: &WideTable,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    if table.columns.is_empty() {
        return Ok(());
    }

    // Top level: base columns merge down through the whole header block,
    // category labels merge across their bookmaker x outcome span.
    let mut col: u16 = 0;
    while (col as usize) < table.columns.len() {
        let key = &table.columns[col as usize];
        let span = table.columns[col as usize..]
            .iter()
            .take_while(|candidate| candidate.top == key.top)
            .count() as u16;
        if key.is_base() {
            sheet.merge_range(0, col, HEADER_ROWS - 1, col, &key.top, header)?;
        } else {
            sheet.merge_range(0, col, 0, col + span - 1, &key.top, header)?;
        }
        col += span;
    }

    // Middle level: bookmaker labels span their three outcome columns.
    let mut col: u16 = 0;
    while (col as usize) < table.columns.len() {
        let key = &table.columns[col as usize];
        if key.is_base() {
            col += 1;
            continue;
        }
        let span = table.columns[col as usize..]
            .iter()
            .take_while(|candidate| candidate.top == key.top && candidate.mid == key.mid)
            .count() as u16;
        if span > 1 {
            sheet.merge_range(1, col, 1, col + span - 1, &key.mid, header)?;
        } else {
            sheet.write_string_with_format(1, col, key.mid.as_str(), header)?;
        }
        col += span;
    }

    // Bottom level: outcome labels.
    for (index, key) in table.columns.iter().enumerate() {
        if !key.bottom.is_empty() {
            sheet.write_string_with_format(2, index as u16, key.bottom.as_str(), header)?;
        }
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        for (col_index, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(HEADER_ROWS + row_index as u32, col_index as u16, value.as_str())?;
            }
        }
    }

    // Date and team columns carry the longest values.
    sheet.set_column_width(0, 16)?;
    sheet.set_column_width(1, 22)?;
    sheet.set_column_width(2, 22)?;
    Ok(())
}

/// Plain-text fixture list next to the workbook: one `HOME vs AWAY` line
/// per record, in sheet order.
pub async fn write_matchlist(path: &Path, datasets: &[LeagueRecords]) -> Result<()> {
    let mut lines = String::new();
    for dataset in datasets {
        for record in &dataset.records {
            lines.push_str(&format!("{} vs {}\n", record.home, record.away));
        }
    }
    tokio::fs::write(path, lines)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(file = %path.display(), "fixture list written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MatchRecord, OddsQuote, Outcome};
    use std::collections::BTreeMap;

    fn sample_league() -> LeagueRecords {
        let mut odds = BTreeMap::new();
        odds.insert(
            "Pinnacle".to_string(),
            vec![
                OddsQuote { outcome: Outcome::Home, price: "1.85".to_string() },
                OddsQuote { outcome: Outcome::Draw, price: "3.60".to_string() },
                OddsQuote { outcome: Outcome::Away, price: "4.20".to_string() },
            ],
        );
        LeagueRecords {
            league: "LaLiga".to_string(),
            records: vec![MatchRecord {
                date: Some("15.03.2025 21:00".to_string()),
                home: "Real Madrid".to_string(),
                away: "Barcelona".to_string(),
                odds,
                url: "https://example.com/m/1".to_string(),
            }],
        }
    }

    #[test]
    fn test_sheet_name_passthrough() {
        assert_eq!(sheet_name("LaLiga"), "LaLiga");
        assert_eq!(sheet_name("Serie A"), "Serie A");
    }

    #[test]
    fn test_sheet_name_strips_forbidden_chars() {
        assert_eq!(sheet_name("Ligue 1 [2025/26]"), "Ligue 1  2025 26");
    }

    #[test]
    fn test_sheet_name_truncates() {
        let long = "A".repeat(40);
        assert_eq!(sheet_name(&long).chars().count(), 31);
    }

    #[test]
    fn test_sheet_name_never_empty() {
        assert_eq!(sheet_name("///"), "Sheet");
    }

    #[test]
    fn test_build_workbook_produces_xlsx() {
        let datasets = vec![sample_league()];
        let mut workbook = build_workbook(&datasets, &ScrapeConfig::default()).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        // xlsx is a zip container
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_build_workbook_with_empty_league() {
        let datasets = vec![
            sample_league(),
            LeagueRecords { league: "Serie A".to_string(), records: vec![] },
        ];
        let mut workbook = build_workbook(&datasets, &ScrapeConfig::default()).unwrap();
        assert!(workbook.save_to_buffer().is_ok());
    }

    #[tokio::test]
    async fn test_write_matchlist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.txt");
        write_matchlist(&path, &[sample_league()]).await.unwrap();
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "Real Madrid vs Barcelona\n");
    }

    #[test]
    fn test_write_workbook_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odds.xlsx");
        write_workbook(&path, &[sample_league()], &ScrapeConfig::default()).unwrap();
        assert!(path.exists());
    }
}

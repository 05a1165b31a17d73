//! Run configuration: which league pages to visit and how to shape the
//! export. Built once at startup, immutable afterwards; the pipeline only
//! ever borrows it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Site origin; relative detail links resolve against this.
pub const DEFAULT_BASE_URL: &str = "https://www.oddsportal.com";

/// Root structure for the YAML configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Leagues to scrape, in sheet order.
    pub leagues: Vec<League>,
    /// Bookmakers that get fixed columns in the export, in column order.
    #[serde(default = "default_bookmakers")]
    pub bookmakers: Vec<String>,
    /// Markets to export and the column labels they appear under.
    #[serde(default = "default_bet_types")]
    pub bet_types: Vec<BetType>,
}

/// One league listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    /// Display name, used as the workbook sheet label.
    pub name: String,
    /// First listing page; deeper pages derive from it.
    pub url: String,
}

/// A market and the heading it exports under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetType {
    /// Market name as the site displays it.
    pub name: String,
    /// Top-level column heading in the export.
    pub category: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: default_base_url(),
            leagues: vec![League {
                name: "LaLiga".to_string(),
                url: format!("{DEFAULT_BASE_URL}/football/spain/laliga/"),
            }],
            bookmakers: default_bookmakers(),
            bet_types: default_bet_types(),
        }
    }
}

impl ScrapeConfig {
    /// Load from a YAML file, or fall back to built-in defaults when no
    /// path was given.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(ScrapeConfig::default());
        };
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// The five league pages the project tracks; `init` writes this as the
    /// starter file. Trim the list down for shorter runs.
    pub fn starter() -> Self {
        ScrapeConfig {
            leagues: vec![
                League {
                    name: "LaLiga".to_string(),
                    url: format!("{DEFAULT_BASE_URL}/football/spain/laliga/"),
                },
                League {
                    name: "Premier League".to_string(),
                    url: format!("{DEFAULT_BASE_URL}/football/england/premier-league/"),
                },
                League {
                    name: "Ligue 1".to_string(),
                    url: format!("{DEFAULT_BASE_URL}/football/france/ligue-1/"),
                },
                League {
                    name: "Bundesliga".to_string(),
                    url: format!("{DEFAULT_BASE_URL}/football/germany/bundesliga/"),
                },
                League {
                    name: "Serie A".to_string(),
                    url: format!("{DEFAULT_BASE_URL}/football/italy/serie-a/"),
                },
            ],
            ..ScrapeConfig::default()
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_bookmakers() -> Vec<String> {
    vec![
        "Pinnacle".to_string(),
        "bet365".to_string(),
        "1xBet".to_string(),
    ]
}

fn default_bet_types() -> Vec<BetType> {
    vec![
        BetType {
            name: "1X2".to_string(),
            category: "1X2 - Full time".to_string(),
        },
        BetType {
            name: "1st Half 1X2".to_string(),
            category: "1X2 - 1st half".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScrapeConfig::default();
        assert_eq!(config.base_url, "https://www.oddsportal.com");
        assert_eq!(config.leagues.len(), 1);
        assert_eq!(config.leagues[0].name, "LaLiga");
        assert_eq!(config.bookmakers, vec!["Pinnacle", "bet365", "1xBet"]);
        assert_eq!(config.bet_types.len(), 2);
        assert_eq!(config.bet_types[0].category, "1X2 - Full time");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = serde_yaml::to_string(&ScrapeConfig::starter()).unwrap();
        let parsed: ScrapeConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.leagues.len(), 5);
        assert_eq!(parsed.leagues[1].name, "Premier League");
        assert!(parsed.leagues[1].url.ends_with("/football/england/premier-league/"));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
leagues:
  - name: Eredivisie
    url: https://www.oddsportal.com/football/netherlands/eredivisie/
"#;
        let config: ScrapeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.leagues.len(), 1);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bookmakers.len(), 3);
        assert_eq!(config.bet_types.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let err = ScrapeConfig::load(Some(Path::new("/nonexistent/oddsgrab.yaml")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = ScrapeConfig::load(None).await.unwrap();
        assert_eq!(config.leagues[0].name, "LaLiga");
    }
}

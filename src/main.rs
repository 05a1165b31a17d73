//! oddsgrab CLI
//!
//! Collects football match odds with headless Chrome and exports them as
//! a multi-sheet workbook. The sites involved render client-side, so
//! plain HTTP fetching gets an empty shell; a real browser does not.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use oddsgrab::count::{run_count, CountArgs};
use oddsgrab::init::{run_init, InitArgs};
use oddsgrab::scrape::{run_scrape, ScrapeArgs};

#[derive(Parser)]
#[command(name = "oddsgrab")]
#[command(version)]
#[command(about = "Football odds collector with headless Chrome")]
#[command(
    long_about = "Collects football match odds and exports them as a multi-sheet workbook.\n\nCommands:\n  scrape   Collect configured leagues and write the workbook\n  count    Audit a saved listing page offline\n  init     Write a starter configuration file"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape configured leagues and export the odds workbook
    Scrape(ScrapeArgs),
    /// Count unique matches in a saved listing-page HTML file
    Count(CountArgs),
    /// Write a starter configuration file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape(args) => run_scrape(args).await,
        Commands::Count(args) => run_count(args).await,
        Commands::Init(args) => run_init(args).await,
    }
}

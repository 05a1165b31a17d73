//! init command: write a starter configuration file.
//!
//! Emits the full five-league YAML so a run can start from an editable
//! template instead of the built-in single-league default.

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::ScrapeConfig;

#[derive(Args)]
pub struct InitArgs {
    /// Output file path (default: oddsgrab.yaml)
    #[arg(short, long, default_value = "oddsgrab.yaml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

pub async fn run_init(args: InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        );
    }

    let mut yaml = String::from(
        "# oddsgrab configuration\n\
         # leagues: scraped in order; names become workbook sheet labels.\n\
         # bookmakers: fixed export columns, in order. Others found on a page are ignored.\n\
         # bet_types: market name as the site shows it, and the column heading it exports under.\n",
    );
    yaml.push_str(&serde_yaml::to_string(&ScrapeConfig::starter())?);
    tokio::fs::write(&args.output, yaml).await?;

    println!("Wrote {}", args.output.display());
    Ok(())
}

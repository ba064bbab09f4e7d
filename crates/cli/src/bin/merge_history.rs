//! Merge the deducted secondary export into a monthly history.

use anyhow::Result;
use clap::Parser;
use histdata_cli::{init_tracing, load_config, parse_date_arg};
use histdata_core::config::MergePolicy;
use histdata_merge::{run_merge, MergeOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "merge-history",
    about = "Override monthly records inside a date window with a secondary export"
)]
struct Cli {
    /// Secondary line-oriented export. Defaults to docs/raw/qld-deducted.csv;
    /// give both paths or neither.
    #[arg(requires = "target")]
    source: Option<PathBuf>,

    /// Monthly dataset to update. Defaults to data/qld-history.json.
    #[arg(requires = "source")]
    target: Option<PathBuf>,

    /// First day of the window (YYYY-MM-DD). Defaults to 2000-03-01.
    #[arg(long)]
    start: Option<String>,

    /// Last day of the window (YYYY-MM-DD). Defaults to 2006-06-01.
    #[arg(long)]
    end: Option<String>,

    /// Only add months the dataset is missing instead of overriding.
    #[arg(long, default_value_t = false)]
    fill_missing: bool,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?.merge;
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(target) = cli.target {
        config.target = target;
    }
    if let Some(start) = cli.start.as_deref() {
        config.window.start = parse_date_arg(start)?;
    }
    if let Some(end) = cli.end.as_deref() {
        config.window.end = parse_date_arg(end)?;
    }
    config.window.validate()?;
    if cli.fill_missing {
        config.policy = MergePolicy::FillMissing;
    }

    match run_merge(&config)? {
        MergeOutcome::Completed(report) => {
            println!("Loaded {} months from existing JSON.", report.loaded);
            println!("Found {} new months in CSV.", report.found);
            println!("Total months in updated JSON: {}", report.total);
            println!("Updated {} successfully.", report.target.display());
        }
        MergeOutcome::SourceMissing(path) => {
            println!("CSV file {} not found.", path.display());
        }
        MergeOutcome::TargetMissing(path) => {
            println!("JSON file {} not found.", path.display());
        }
    }

    Ok(())
}

//! Extract a monthly history from the daily-history HTML export.

use anyhow::Result;
use clap::Parser;
use histdata_cli::{init_tracing, load_config};
use histdata_ingestion::{run_extraction, ExtractOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "extract-history",
    about = "Aggregate a daily-history HTML export into monthly low/close records"
)]
struct Cli {
    /// HTML export. Defaults to docs/raw/qld-history.html; give both paths or neither.
    #[arg(requires = "output")]
    input: Option<PathBuf>,

    /// Monthly dataset to write. Defaults to data/qld-history.json.
    #[arg(requires = "input")]
    output: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?.extract;
    if let Some(input) = cli.input {
        config.input = input;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    match run_extraction(&config)? {
        ExtractOutcome::Completed(summary) => {
            println!(
                "Successfully processed {} months of data from {}.",
                summary.months,
                config.input.display()
            );
            println!("Result saved to {}", summary.output.display());
        }
        ExtractOutcome::InputMissing(path) => {
            println!("File {} not found.", path.display());
        }
        ExtractOutcome::BodyMissing(path) => {
            println!("Could not find tbody in {}", path.display());
        }
    }

    Ok(())
}

//! Join a base index history with its leveraged counterpart.

use anyhow::Result;
use clap::Parser;
use histdata_cli::init_tracing;
use histdata_merge::{run_combine, CombineOutcome};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "combine-history",
    about = "Join two monthly histories into one row per month"
)]
struct Cli {
    /// Base index monthly dataset (e.g. data/qqq-history.json).
    base: PathBuf,

    /// Leveraged counterpart monthly dataset (e.g. data/qld-history.json).
    leveraged: PathBuf,

    /// Where to write the market rows.
    #[arg(default_value = "data/market-data.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match run_combine(&cli.base, &cli.leveraged, &cli.output)? {
        CombineOutcome::Completed { rows, output } => {
            println!("Wrote {} months of market data to {}", rows, output.display());
        }
        CombineOutcome::InputMissing(path) => {
            println!("File {} not found.", path.display());
        }
    }

    Ok(())
}

//! Shared setup for the histdata binaries.
//!
//! - `extract-history`: HTML export to monthly dataset
//! - `merge-history`: secondary export merged into the monthly dataset
//! - `combine-history`: base and leveraged datasets joined into market rows

use anyhow::{Context, Result};
use chrono::NaiveDate;
use histdata_core::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "histdata_cli=info,histdata_core=info,histdata_ingestion=info,histdata_merge=info,warn";

/// Install the fmt subscriber, honoring `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration file if one was given, else the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Parse a `YYYY-MM-DD` command-line date.
pub fn parse_date_arg(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").with_context(|| format!("invalid date {text:?}"))
}

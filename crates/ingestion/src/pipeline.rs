//! Primary extraction pipeline: HTML export → monthly dataset on disk.

use histdata_core::config::ExtractConfig;
use histdata_core::{store, Error, MonthlyDataset, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::aggregator::aggregate_monthly;
use crate::html::parse_table_body;
use crate::table::{ExtractionStats, TableExtractor};

/// Result of a successful extraction run.
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    /// Months written.
    pub months: usize,
    /// Row-level statistics.
    pub stats: ExtractionStats,
    /// Where the dataset was written.
    pub output: PathBuf,
}

/// How an extraction run ended. Early exits are not errors.
#[derive(Debug, Clone)]
pub enum ExtractOutcome {
    /// Dataset written.
    Completed(ExtractSummary),
    /// Input file does not exist; nothing written.
    InputMissing(PathBuf),
    /// Input has no table body; nothing written.
    BodyMissing(PathBuf),
}

/// Extract the monthly dataset from HTML text.
///
/// Returns `None` when the document has no table body.
pub fn extract_monthly(html: &str) -> Option<(MonthlyDataset, ExtractionStats)> {
    let rows = parse_table_body(html)?;

    let mut extractor = TableExtractor::new();
    let daily = extractor.extract(&rows);
    let dataset = aggregate_monthly(&daily);

    Some((dataset, extractor.stats().clone()))
}

/// Run the extraction pipeline for one input/output pair.
pub fn run_extraction(config: &ExtractConfig) -> Result<ExtractOutcome> {
    let input = &config.input;
    if !input.exists() {
        warn!(path = %input.display(), "input not found");
        return Ok(ExtractOutcome::InputMissing(input.clone()));
    }

    info!(path = %input.display(), "processing history export");
    let bytes = fs::read(input).map_err(|e| Error::file(input, e))?;
    let html = String::from_utf8_lossy(&bytes);

    let Some((dataset, stats)) = extract_monthly(&html) else {
        warn!(path = %input.display(), "no table body found");
        return Ok(ExtractOutcome::BodyMissing(input.clone()));
    };

    debug!(
        rows = stats.rows_seen,
        short_rows = stats.short_rows,
        bad_dates = stats.bad_dates,
        defaulted_numbers = stats.defaulted_numbers,
        "extraction stats"
    );

    store::save_dataset(&config.output, &dataset)?;
    info!(
        months = dataset.len(),
        output = %config.output.display(),
        "monthly dataset written"
    );

    Ok(ExtractOutcome::Completed(ExtractSummary {
        months: dataset.len(),
        stats,
        output: config.output.clone(),
    }))
}

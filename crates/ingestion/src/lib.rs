//! Primary-source ingestion for the histdata system.
//!
//! This crate handles:
//! - French-locale date and number normalization
//! - Table markup scanning
//! - Daily record extraction from table rows
//! - Monthly aggregation (lowest low, latest close)
//! - The extraction pipeline that writes the monthly dataset

pub mod aggregator;
pub mod html;
pub mod locale;
pub mod pipeline;
pub mod table;

pub use aggregator::{aggregate_monthly, MonthlyBuilder};
pub use locale::{parse_locale_date, parse_locale_number, LocaleNumber};
pub use pipeline::{extract_monthly, run_extraction, ExtractOutcome, ExtractSummary};
pub use table::{ExtractionStats, TableExtractor};

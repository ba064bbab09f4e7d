//! Secondary-source merging for the histdata system.
//!
//! This crate handles:
//! - Parsing the line-oriented secondary export within a date window
//! - Merging its monthly entries into the persisted dataset
//! - Joining a base and a leveraged history into market rows

pub mod combine;
pub mod merger;
pub mod pipeline;
pub mod secondary;

pub use combine::{combine_histories, MarketRow};
pub use merger::{merge_monthly, MergeSummary};
pub use pipeline::{run_combine, run_merge, CombineOutcome, MergeOutcome, MergeReport};
pub use secondary::{SecondaryParser, SecondaryStats};

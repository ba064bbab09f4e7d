//! Joining a base index history with its leveraged counterpart.
//!
//! Downstream simulations consume one row per month carrying both
//! instruments. Months where either close is missing or non-positive are
//! dropped.

use histdata_core::MonthlyDataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One month of both instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRow {
    /// First day of the month, "YYYY-MM-01".
    pub date: String,
    pub base_close: f64,
    pub base_low: f64,
    pub leveraged_close: f64,
    pub leveraged_low: f64,
}

/// Join two monthly histories on month.
pub fn combine_histories(base: &MonthlyDataset, leveraged: &MonthlyDataset) -> Vec<MarketRow> {
    let months: BTreeSet<&str> = base.months().chain(leveraged.months()).collect();

    months
        .into_iter()
        .map(|month| {
            let base = base.get(month);
            let lev = leveraged.get(month);
            MarketRow {
                date: format!("{month}-01"),
                base_close: base.map_or(0.0, |r| r.close),
                base_low: base.map_or(0.0, |r| r.low),
                leveraged_close: lev.map_or(0.0, |r| r.close),
                leveraged_low: lev.map_or(0.0, |r| r.low),
            }
        })
        .filter(|row| row.base_close > 0.0 && row.leveraged_close > 0.0)
        .collect()
}

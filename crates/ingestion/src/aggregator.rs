//! Monthly aggregation of daily records.
//!
//! Builds one record per calendar month: the lowest low seen and the close
//! of the latest day seen. Input order doesn't matter; the export lists days
//! newest first.

use histdata_core::{DailyRecord, IsoDate, MonthKey, MonthlyDataset, MonthlyRecord};
use std::collections::BTreeMap;

/// Builder for monthly records from daily records.
#[derive(Debug, Default)]
pub struct MonthlyBuilder {
    /// Months being built, keyed by month.
    months: BTreeMap<MonthKey, MonthInProgress>,
}

/// A month that's currently being built.
#[derive(Debug, Clone)]
struct MonthInProgress {
    month: MonthKey,
    low: f64,
    close: f64,
    /// Date whose close is currently held.
    last_date: IsoDate,
}

impl MonthInProgress {
    fn new(record: &DailyRecord) -> Self {
        Self {
            month: record.month.clone(),
            low: record.low,
            close: record.close,
            last_date: record.date.clone(),
        }
    }

    fn add_record(&mut self, record: &DailyRecord) {
        if record.low < self.low {
            self.low = record.low;
        }
        // Strictly later only: for a repeated date the first close seen stays.
        if record.date > self.last_date {
            self.last_date = record.date.clone();
            self.close = record.close;
        }
    }

    fn to_record(&self) -> MonthlyRecord {
        MonthlyRecord::new(self.month.clone(), self.low, self.close)
    }
}

impl MonthlyBuilder {
    /// Create a new monthly builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a daily record.
    pub fn add_record(&mut self, record: &DailyRecord) {
        match self.months.get_mut(&record.month) {
            Some(month) => month.add_record(record),
            None => {
                self.months
                    .insert(record.month.clone(), MonthInProgress::new(record));
            }
        }
    }

    /// Add multiple daily records.
    pub fn add_records(&mut self, records: &[DailyRecord]) {
        for record in records {
            self.add_record(record);
        }
    }

    /// Get the number of months currently being built.
    pub fn pending_month_count(&self) -> usize {
        self.months.len()
    }

    /// Finish all months into a dataset sorted by month.
    pub fn finish(self) -> MonthlyDataset {
        self.months.values().map(MonthInProgress::to_record).collect()
    }
}

/// Aggregate daily records into a monthly dataset.
pub fn aggregate_monthly(records: &[DailyRecord]) -> MonthlyDataset {
    let mut builder = MonthlyBuilder::new();
    builder.add_records(records);
    builder.finish()
}

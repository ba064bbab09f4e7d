//! Core data types for the histdata system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Canonical month key, "YYYY-MM".
pub type MonthKey = String;

/// Derive the month key from an ISO date: its first 7 characters.
#[inline]
pub fn month_key(date: &str) -> MonthKey {
    date.chars().take(7).collect()
}

/// ISO calendar date text, "YYYY-MM-DD".
///
/// Kept as text rather than a `NaiveDate`: the locale exports occasionally
/// carry days or years that are not valid calendar values, and those rows are
/// still aggregated. Ordering is lexicographic, which matches chronological
/// order for zero-padded dates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsoDate(String);

impl IsoDate {
    /// Wrap already-formatted date text.
    pub fn new(text: impl Into<String>) -> Self {
        IsoDate(text.into())
    }

    /// Date text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Month key of this date.
    #[inline]
    pub fn month(&self) -> MonthKey {
        month_key(&self.0)
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for IsoDate {
    fn from(date: NaiveDate) -> Self {
        IsoDate(date.format("%Y-%m-%d").to_string())
    }
}

/// One trading day extracted from the primary export. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    /// Trading day.
    pub date: IsoDate,
    /// Lowest traded price of the day.
    pub low: f64,
    /// Closing price of the day.
    pub close: f64,
    /// Month key derived from `date`.
    pub month: MonthKey,
}

impl DailyRecord {
    /// Create a daily record, deriving its month key.
    pub fn new(date: IsoDate, low: f64, close: f64) -> Self {
        let month = date.month();
        Self {
            date,
            low,
            close,
            month,
        }
    }
}

/// Monthly summary: lowest low and the close of the latest observed day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month key, "YYYY-MM".
    pub month: MonthKey,
    /// Minimum low observed in the month.
    pub low: f64,
    /// Close of the chronologically latest observed day.
    pub close: f64,
}

impl MonthlyRecord {
    pub fn new(month: impl Into<MonthKey>, low: f64, close: f64) -> Self {
        Self {
            month: month.into(),
            low,
            close,
        }
    }
}

/// Monthly records keyed by month, always iterated in ascending month order.
///
/// Serialized as a plain JSON array of records. On deserialization a later
/// entry replaces an earlier one with the same month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<MonthlyRecord>", into = "Vec<MonthlyRecord>")]
pub struct MonthlyDataset {
    records: BTreeMap<MonthKey, MonthlyRecord>,
}

impl MonthlyDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a month.
    pub fn get(&self, month: &str) -> Option<&MonthlyRecord> {
        self.records.get(month)
    }

    pub fn contains(&self, month: &str) -> bool {
        self.records.contains_key(month)
    }

    /// Insert or replace the record for its month, returning the replaced one.
    pub fn upsert(&mut self, record: MonthlyRecord) -> Option<MonthlyRecord> {
        self.records.insert(record.month.clone(), record)
    }

    /// Records in ascending month order.
    pub fn iter(&self) -> impl Iterator<Item = &MonthlyRecord> {
        self.records.values()
    }

    /// Month keys in ascending order.
    pub fn months(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Consume into an ascending vector of records.
    pub fn into_records(self) -> Vec<MonthlyRecord> {
        self.records.into_values().collect()
    }
}

impl FromIterator<MonthlyRecord> for MonthlyDataset {
    fn from_iter<I: IntoIterator<Item = MonthlyRecord>>(iter: I) -> Self {
        let mut dataset = MonthlyDataset::new();
        for record in iter {
            dataset.upsert(record);
        }
        dataset
    }
}

impl From<Vec<MonthlyRecord>> for MonthlyDataset {
    fn from(records: Vec<MonthlyRecord>) -> Self {
        records.into_iter().collect()
    }
}

impl From<MonthlyDataset> for Vec<MonthlyRecord> {
    fn from(dataset: MonthlyDataset) -> Self {
        dataset.into_records()
    }
}

/// Inclusive date range within which the secondary source is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First included day.
    pub start: NaiveDate,
    /// Last included day.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Check that the window is not inverted.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::config(format!(
                "date window start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    /// Whether a `YYYY-MM-DD` date text falls inside the window.
    ///
    /// Compared as text so that dates which are not valid calendar days
    /// (e.g. `2003-02-30`) still sort into place.
    pub fn contains(&self, date: &str) -> bool {
        let start = IsoDate::from(self.start);
        let end = IsoDate::from(self.end);
        start.as_str() <= date && date <= end.as_str()
    }
}

impl Default for DateWindow {
    /// Gap range covered by the deducted secondary export.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2000, 3, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2006, 6, 1).unwrap_or_default(),
        }
    }
}

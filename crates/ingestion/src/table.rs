//! Daily record extraction from table rows.
//!
//! Rows that don't fit the known export layout are skipped, not rejected:
//! short rows are annotations (dividends, splits) and rows with unreadable
//! dates carry nothing to aggregate.

use histdata_core::DailyRecord;

use crate::locale::{parse_locale_date, parse_locale_number};

// Column positions of the daily-history export. Coupled to that one format.

/// Rows with fewer cells are auxiliary (dividend and split annotations).
pub const MIN_CELLS: usize = 5;
/// Date cell ("15 mars 2021").
pub const DATE_COLUMN: usize = 0;
/// Daily low ("Plus bas").
pub const LOW_COLUMN: usize = 3;
/// Daily close ("Fermeture").
pub const CLOSE_COLUMN: usize = 4;

/// Statistics about one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Rows examined.
    pub rows_seen: u64,
    /// Rows with fewer than `MIN_CELLS` cells.
    pub short_rows: u64,
    /// Rows whose date cell didn't parse.
    pub bad_dates: u64,
    /// Price cells that defaulted to zero.
    pub defaulted_numbers: u64,
    /// Records emitted.
    pub records: u64,
}

impl ExtractionStats {
    /// Rows skipped for any reason.
    pub fn skipped(&self) -> u64 {
        self.short_rows + self.bad_dates
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Extracts daily records from the rows of the history table.
#[derive(Debug, Default)]
pub struct TableExtractor {
    stats: ExtractionStats,
}

impl TableExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract one row. Returns `None` for rows that are skipped.
    pub fn extract_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Option<DailyRecord> {
        self.stats.rows_seen += 1;

        if cells.len() < MIN_CELLS {
            self.stats.short_rows += 1;
            return None;
        }
        let cell = |i: usize| cells.get(i).map(|c| c.as_ref()).unwrap_or("");

        let Some(date) = parse_locale_date(cell(DATE_COLUMN)) else {
            self.stats.bad_dates += 1;
            return None;
        };

        let low = parse_locale_number(cell(LOW_COLUMN));
        let close = parse_locale_number(cell(CLOSE_COLUMN));
        self.stats.defaulted_numbers +=
            u64::from(low.is_defaulted()) + u64::from(close.is_defaulted());

        self.stats.records += 1;
        Some(DailyRecord::new(date, low.value(), close.value()))
    }

    /// Extract all rows, preserving source order.
    pub fn extract<S: AsRef<str>>(&mut self, rows: &[Vec<S>]) -> Vec<DailyRecord> {
        rows.iter().filter_map(|row| self.extract_row(row)).collect()
    }

    /// Get extraction statistics.
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }
}

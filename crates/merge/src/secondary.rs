//! Line-oriented secondary source parsing.
//!
//! The secondary export is already monthly: each relevant line carries a
//! `YYYY-MM-DD` date followed by the month's low and close. Header, footer
//! and blank lines have no date and are skipped, as are lines outside the
//! configured window.

use histdata_core::{month_key, DateWindow, Error, MonthlyDataset, MonthlyRecord, Result};
use histdata_ingestion::parse_locale_number;
use regex::Regex;

const DATE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}";

/// Statistics about one secondary parsing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryStats {
    /// Non-blank lines examined.
    pub lines_seen: u64,
    /// Lines without a date.
    pub undated_lines: u64,
    /// Dated lines outside the window.
    pub outside_window: u64,
    /// In-window lines with fewer than three tokens.
    pub short_lines: u64,
    /// Low/close tokens that defaulted to zero.
    pub defaulted_numbers: u64,
    /// Lines that produced an entry (later lines may replace earlier ones).
    pub entries: u64,
}

/// Parser for the secondary source restricted to a date window.
pub struct SecondaryParser {
    window: DateWindow,
    date_re: Regex,
    stats: SecondaryStats,
}

impl SecondaryParser {
    /// Create a parser for the given inclusive window.
    pub fn new(window: DateWindow) -> Result<Self> {
        window.validate()?;
        let date_re = Regex::new(DATE_PATTERN)
            .map_err(|e| Error::config(format!("date pattern: {e}")))?;
        Ok(Self {
            window,
            date_re,
            stats: SecondaryStats::default(),
        })
    }

    /// Parse one line. Returns `None` for lines that are skipped.
    pub fn parse_line(&mut self, line: &str) -> Option<MonthlyRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.stats.lines_seen += 1;

        let Some(date) = self.date_re.find(line) else {
            self.stats.undated_lines += 1;
            return None;
        };
        if !self.window.contains(date.as_str()) {
            self.stats.outside_window += 1;
            return None;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            self.stats.short_lines += 1;
            return None;
        }

        // The month comes from the leading token, which for well-formed lines
        // is the same date the pattern matched.
        let low = parse_locale_number(tokens[1]);
        let close = parse_locale_number(tokens[2]);
        self.stats.defaulted_numbers +=
            u64::from(low.is_defaulted()) + u64::from(close.is_defaulted());

        self.stats.entries += 1;
        Some(MonthlyRecord::new(
            month_key(tokens[0]),
            round_cents(low.value()),
            round_cents(close.value()),
        ))
    }

    /// Parse a whole source. A later line replaces an earlier one for the
    /// same month.
    pub fn parse(&mut self, text: &str) -> MonthlyDataset {
        text.lines()
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    /// The configured window.
    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// Get parsing statistics.
    pub fn stats(&self) -> &SecondaryStats {
        &self.stats
    }
}

/// Round to two decimal places, correctly rounded from the exact value.
pub fn round_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

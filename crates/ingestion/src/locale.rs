//! French-locale date and number normalization.
//!
//! The daily-history export writes dates as "15 mars 2021" and prices as
//! "1 234,56" with narrow no-break spaces as thousands separators. Parsing is
//! permissive: a date that doesn't have three parts is absent, and a number
//! that doesn't parse is reported as defaulted to zero.

use histdata_core::IsoDate;

/// French month abbreviations as they appear in the export.
const MONTHS: [(&str, &str); 12] = [
    ("janv.", "01"),
    ("févr.", "02"),
    ("mars", "03"),
    ("avr.", "04"),
    ("mai", "05"),
    ("juin", "06"),
    ("juil.", "07"),
    ("août", "08"),
    ("sept.", "09"),
    ("oct.", "10"),
    ("nov.", "11"),
    ("déc.", "12"),
];

/// Month used for abbreviations outside the table.
const FALLBACK_MONTH: &str = "01";

/// Separator characters removed before numeric parsing.
const NUMBER_SEPARATORS: [char; 4] = ['\u{202f}', '\u{200b}', '\u{a0}', ' '];

/// Map a French month abbreviation to its two-digit number.
pub fn month_number(abbrev: &str) -> Option<&'static str> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == abbrev)
        .map(|(_, num)| *num)
}

/// Parse "<day> <monthAbbrev> <year>" into an ISO date.
///
/// Unknown month abbreviations fall back to January. The day is zero-padded
/// to two characters; no calendar validation is done.
pub fn parse_locale_date(text: &str) -> Option<IsoDate> {
    let mut parts = text.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month = month_number(month).unwrap_or(FALLBACK_MONTH);
    Some(IsoDate::new(format!("{year}-{month}-{day:0>2}")))
}

/// Outcome of parsing a locale-formatted number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocaleNumber {
    /// The text held a number.
    Parsed(f64),
    /// Empty or unparseable text; treated as zero.
    Defaulted,
}

impl LocaleNumber {
    /// Numeric value, zero when defaulted.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            LocaleNumber::Parsed(v) => v,
            LocaleNumber::Defaulted => 0.0,
        }
    }

    #[inline]
    pub fn is_defaulted(self) -> bool {
        matches!(self, LocaleNumber::Defaulted)
    }
}

/// Parse "1 234,56"-style text.
///
/// `inf` and `NaN` spellings are defaulted: JSON has no representation for
/// them and the stored dataset could not be read back.
pub fn parse_locale_number(text: &str) -> LocaleNumber {
    let cleaned: String = text
        .chars()
        .filter(|c| !NUMBER_SEPARATORS.contains(c))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return LocaleNumber::Defaulted;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => LocaleNumber::Parsed(v),
        _ => LocaleNumber::Defaulted,
    }
}

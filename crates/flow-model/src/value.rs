//! Scalar field values shared by every listable record.
//!
//! Missing or malformed values never fail: they read as the empty string for
//! text purposes and as zero for numeric purposes.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A named scalar value read from a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent or null.
    #[default]
    Missing,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    /// Text form used for search and exact-match filters.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Missing => Cow::Borrowed(""),
            Self::Text(value) => Cow::Borrowed(value.as_str()),
            Self::Bool(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Number(value) => Cow::Owned(format_number(*value)),
            Self::Date(value) => Cow::Owned(value.format(DATE_FORMAT).to_string()),
        }
    }

    /// Numeric form used for sums; anything non-numeric reads as zero.
    pub fn number(&self) -> f64 {
        let value = match self {
            Self::Integer(value) => *value as f64,
            Self::Number(value) => *value,
            Self::Text(value) => parse_number(value).unwrap_or(0.0),
            Self::Missing | Self::Bool(_) | Self::Date(_) => 0.0,
        };
        if value.is_finite() { value } else { 0.0 }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(value) => parse_date(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Three-way comparison used by list sorting.
    ///
    /// Values rank as numbers, then dates, then text. Numbers compare
    /// numerically, including numeric text; a missing or blank value counts
    /// as zero. Dates compare chronologically, also when stored as text.
    /// Everything else compares by its text form. The ranking makes this a
    /// total order even when a column mixes types.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.sort_key(), other.sort_key()) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(&b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(&b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(&b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn sort_key(&self) -> SortKey<'_> {
        match self {
            Self::Missing => SortKey::Number(0.0),
            Self::Integer(value) => SortKey::Number(*value as f64),
            Self::Number(value) => SortKey::Number(if value.is_finite() { *value } else { 0.0 }),
            Self::Date(date) => SortKey::Date(*date),
            Self::Bool(_) => SortKey::Text(self.text()),
            Self::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    SortKey::Number(0.0)
                } else if let Some(number) = parse_number(trimmed) {
                    SortKey::Number(number)
                } else if let Some(date) = parse_date(trimmed) {
                    SortKey::Date(date)
                } else {
                    SortKey::Text(Cow::Borrowed(value.as_str()))
                }
            }
        }
    }
}

enum SortKey<'a> {
    Number(f64),
    Date(NaiveDate),
    Text(Cow<'a, str>),
}

impl SortKey<'_> {
    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Date(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

/// A finite number written as plain text, e.g. `"2500"` or `"-12.5"`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let plain = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
    if !plain || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Case-insensitive name comparison that also folds accented letters
/// (`"BÓVEDA MONTE"` names `"Bóveda Monte"`).
pub fn same_name(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Parse a `YYYY-MM-DD` date, also accepting an RFC 3339 timestamp prefix.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_render_without_fraction() {
        assert_eq!(FieldValue::Number(500.0).text(), "500");
        assert_eq!(FieldValue::Number(12.5).text(), "12.5");
    }

    #[test]
    fn missing_reads_as_empty_and_zero() {
        assert_eq!(FieldValue::Missing.text(), "");
        assert_eq!(FieldValue::Missing.number(), 0.0);
    }

    #[test]
    fn non_finite_numbers_read_as_zero() {
        assert_eq!(FieldValue::Number(f64::NAN).number(), 0.0);
        assert_eq!(FieldValue::Number(f64::INFINITY).number(), 0.0);
    }

    #[test]
    fn date_prefix_of_timestamp_parses() {
        let date = parse_date("2025-01-28T10:00:00Z");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 28));
    }
}

//! Calendar dates as they arrive from the forms

use chrono::{Local, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid calendar date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

/// Parse an ISO calendar date.
///
/// Accepts `YYYY-MM-DD`, or a full ISO timestamp whose date part is kept.
/// Surrounding whitespace is ignored.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DateError> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    match (trimmed.get(..10), trimmed.get(10..11)) {
        (Some(day), Some("T")) => NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map_err(|_| DateError::Invalid(raw.to_string())),
        _ => Err(DateError::Invalid(raw.to_string())),
    }
}

/// A date field as supplied: absent, well-formed, or present but unparsable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDate {
    Absent,
    Valid(NaiveDate),
    Invalid,
}

impl FieldDate {
    /// Interpret an optional raw field; empty or blank text counts as absent
    pub fn from_field(raw: Option<&str>) -> Self {
        match raw {
            None => FieldDate::Absent,
            Some(text) if text.trim().is_empty() => FieldDate::Absent,
            Some(text) => match parse_date(text) {
                Ok(date) => FieldDate::Valid(date),
                Err(err) => {
                    tracing::trace!(error = %err, "unparsable date field");
                    FieldDate::Invalid
                }
            },
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, FieldDate::Absent)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            FieldDate::Valid(date) => Some(*date),
            _ => None,
        }
    }
}

/// Source of "today" for the past-date tolerance check
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-01-01"), Ok(ymd(2024, 1, 1)));
        assert_eq!(parse_date("  2024-02-29 "), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_parse_timestamp_keeps_date_part() {
        assert_eq!(parse_date("2024-03-10T15:30:00.000Z"), Ok(ymd(2024, 3, 10)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("01/02/2024").is_err());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("amanhã").is_err());
        assert!(parse_date("2024-01-01X").is_err());
    }

    #[test]
    fn test_field_date_states() {
        assert_eq!(FieldDate::from_field(None), FieldDate::Absent);
        assert_eq!(FieldDate::from_field(Some("")), FieldDate::Absent);
        assert_eq!(FieldDate::from_field(Some("   ")), FieldDate::Absent);
        assert_eq!(FieldDate::from_field(Some("2024-05-01")), FieldDate::Valid(ymd(2024, 5, 1)));
        assert_eq!(FieldDate::from_field(Some("nope")), FieldDate::Invalid);

        assert!(FieldDate::Invalid.is_present());
        assert!(FieldDate::Invalid.date().is_none());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(ymd(2025, 6, 1));
        assert_eq!(clock.today(), ymd(2025, 6, 1));
    }
}

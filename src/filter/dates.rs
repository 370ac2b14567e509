//! Timestamp parsing for filter values
//!
//! Accepted formats, tried in order (first structural match wins):
//! 1. `YYYY-MM-DD` - midnight UTC of that date
//! 2. `YYYY-MM-DDTHH:MM:SS` - that wall time, read as UTC
//! 3. `YYYY-MM-DDTHH:MM:SS.ffffff` followed by `Z` or `+HH:MM` - zoned instant

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use super::errors::{FilterError, FilterResult};

type ParseFn = fn(&str) -> Option<DateTime<Utc>>;

struct DateFormat {
    pattern: Regex,
    parse: ParseFn,
}

impl DateFormat {
    fn new(pattern: &str, parse: ParseFn) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid regex"),
            parse,
        }
    }
}

fn formats() -> &'static [DateFormat] {
    static FORMATS: OnceLock<Vec<DateFormat>> = OnceLock::new();

    FORMATS.get_or_init(|| {
        vec![
            DateFormat::new(r"^\d{4}-\d{2}-\d{2}$", parse_date),
            DateFormat::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}$", parse_local_datetime),
            DateFormat::new(
                r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}(Z|[+-]\d{2}:\d{2})$",
                parse_zoned_datetime,
            ),
        ]
    })
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

fn parse_local_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}

fn parse_zoned_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a filter value into a UTC instant.
///
/// A value that matches a format structurally but names an impossible date
/// (month 13, Feb 30) fails just like an unrecognized one. So does a leap
/// second (`:60`).
pub fn parse_instant(value: &str) -> FilterResult<DateTime<Utc>> {
    let format = formats()
        .iter()
        .find(|format| format.pattern.is_match(value))
        .ok_or_else(|| {
            FilterError::InvalidDateFormat(format!(
                "'{}' is not YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DDTHH:MM:SS.ffffffZ",
                value
            ))
        })?;

    (format.parse)(value)
        // chrono keeps a leap second as a sub-second overflow
        .filter(|instant| instant.timestamp_subsec_nanos() < 1_000_000_000)
        .ok_or_else(|| FilterError::InvalidDateFormat(format!("'{}' is not a valid date", value)))
}

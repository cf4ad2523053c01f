//! Conversions from raw field text to numbers and timestamps.
//!
//! Fields stay strings everywhere else; these conversions only feed type
//! detection and sort keys.

use crate::helpers::string::strip_thousands;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;

/// Date-only layouts, tried in order.
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%a, %b %d, %Y",
];

/// Date-and-time layouts, tried in order. `%.f` also accepts a missing fraction.
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a field as a number after removing thousands-separator commas.
/// Returns `None` for empty, non-numeric or non-finite values.
pub fn parse_number(value: &str) -> Option<f64> {
    let value = strip_thousands(value.trim());
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Parses a field as a calendar date or date/time.
/// Values carrying a UTC offset are converted to UTC.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(value) {
        return Some(datetime.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parses a field as a date and returns milliseconds since the Unix epoch.
pub fn parse_timestamp(value: &str) -> Option<f64> {
    parse_date(value).map(|datetime| datetime.and_utc().timestamp_millis() as f64)
}

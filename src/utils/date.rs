//! Timestamp formatting for templates and feeds.
//!
//! All formatters treat a missing timestamp as an empty string.

use chrono::NaiveDateTime;

/// `MM-DD HH:MM`
const SHORT_FORMAT: &str = "%m-%d %H:%M";
/// `YYYY-MM-DD HH:MM:SS`
const FULL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// ISO-8601 in UTC with a literal `Z`
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[inline]
fn format_with(value: Option<&NaiveDateTime>, pattern: &str) -> String {
    value
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_default()
}

/// Format as `MM-DD HH:MM`.
pub fn format_short_datetime(value: Option<&NaiveDateTime>) -> String {
    format_with(value, SHORT_FORMAT)
}

/// Format as `YYYY-MM-DD HH:MM:SS`.
pub fn format_datetime(value: Option<&NaiveDateTime>) -> String {
    format_with(value, FULL_FORMAT)
}

/// Format as `YYYY-MM-DDTHH:MM:SSZ`. The value is taken to be UTC already.
pub fn format_iso_datetime(value: Option<&NaiveDateTime>) -> String {
    format_with(value, ISO_FORMAT)
}

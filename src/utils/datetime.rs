//! Date and time helpers
//!
//! Timestamps are stored in the database as local time text in the
//! [`DB_DATETIME_FORMAT`] layout, which sorts lexicographically in
//! chronological order.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Layout of every timestamp column.
pub const DB_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout used when printing moments to the user, e.g. `Tue Jan 14 19:13:06 2025`.
pub const DISPLAY_DATETIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Current local time in [`DB_DATETIME_FORMAT`].
pub fn now_timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(DB_DATETIME_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// # Returns
/// * `None` if the text is not in [`DB_DATETIME_FORMAT`]
pub fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts, DB_DATETIME_FORMAT).ok()
}

/// Whole seconds between two stored timestamps, clamped at zero.
pub fn seconds_between(from: &str, to: &str) -> u64 {
    match (parse_timestamp(from), parse_timestamp(to)) {
        (Some(from), Some(to)) => (to - from).num_seconds().max(0) as u64,
        _ => 0,
    }
}

/// Convert a stored local timestamp into an RFC 3339 UTC string.
pub fn to_utc_rfc3339(ts: &str) -> Option<String> {
    let naive = parse_timestamp(ts)?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(local.with_timezone(&Utc).to_rfc3339())
}

/// Convert any RFC 3339 moment into a stored local timestamp.
pub fn rfc3339_to_timestamp(value: &str) -> Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(value)?;
    Ok(format_timestamp(parsed.with_timezone(&Local).naive_local()))
}

/// Render a stored timestamp for humans, falling back to the raw text.
pub fn display_timestamp(ts: &str) -> String {
    parse_timestamp(ts)
        .map(|dt| dt.format(DISPLAY_DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Format a number of seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so long totals stay readable.
pub fn format_seconds(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

use crate::data_types::Timestamp;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `10:30:15`, used on the time axis.
    HourMinSec,
    /// `01/31/2024, 10:30:15`, used by the data table.
    DateTime,
}

fn to_datetime(ms: Timestamp) -> Option<DateTime<Utc>> {
    match Utc.timestamp_millis_opt(ms) {
        chrono::LocalResult::Single(d) => Some(d),
        chrono::LocalResult::Ambiguous(d, _) => Some(d),
        chrono::LocalResult::None => None,
    }
}

/// Formats a millisecond timestamp in UTC. Out-of-range timestamps fall back
/// to the raw number.
pub fn format_timestamp(ms: Timestamp, format: DateFormat) -> String {
    let Some(dt) = to_datetime(ms) else {
        return ms.to_string();
    };
    match format {
        DateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
        DateFormat::DateTime => dt.format("%m/%d/%Y, %H:%M:%S").to_string(),
    }
}

/// Axis label for a (possibly fractional) tick position.
pub fn format_time_tick(ms: f64) -> String {
    if !ms.is_finite() {
        return String::new();
    }
    format_timestamp(ms.round() as Timestamp, DateFormat::HourMinSec)
}

//! Display helpers for log entries

use crate::types::LabelSet;
use chrono::{DateTime, Local, TimeZone};

/// Render a nanosecond timestamp as local `HH:MM:SS.mmm`
///
/// Input that is not an integer is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Render a nanosecond timestamp in the given timezone
pub fn format_timestamp_in<Tz>(timestamp: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match timestamp.trim().parse::<i64>() {
        Ok(nanos) => DateTime::from_timestamp_nanos(nanos)
            .with_timezone(tz)
            .format("%H:%M:%S%.3f")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Render labels as `key=value` pairs separated by spaces
pub fn format_labels(labels: &LabelSet) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

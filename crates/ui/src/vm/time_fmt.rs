use chrono::{DateTime, Utc};

/// Wall-clock time for "started at" labels (`22:13`).
#[must_use]
pub fn format_clock_time(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}

/// Calendar date for badge listings (`2023-11-14`).
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

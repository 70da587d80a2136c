use chrono::{DateTime, Utc};
use progress_core::Clock;

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

#[must_use]
pub fn format_relative(clock: &Clock, value: DateTime<Utc>) -> String {
    clock.relative(value)
}

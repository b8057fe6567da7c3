use chrono::{DateTime, Utc};
use std::time::Duration;

/// Convert epoch milliseconds to a UTC timestamp, `None` when out of range
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Convert a millisecond count from configuration into a `Duration`
pub fn millis_to_duration(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

//! Clock helper

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as milliseconds since the Unix epoch
///
/// Millisecond precision matches the timestamp component of UUIDv7 ids.
pub fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

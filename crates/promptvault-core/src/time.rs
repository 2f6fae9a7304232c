//! Timestamp helpers shared by the store models.
//!
//! All persisted timestamps are RFC 3339 strings.

use chrono::{DateTime, Utc};

/// Returns the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Returns whether `timestamp` falls within `window_ms` of `now`.
///
/// An unparseable timestamp is never inside the window.
pub fn within_window(timestamp: &str, now: DateTime<Utc>, window_ms: i64) -> bool {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(ts) => (now - ts.with_timezone(&Utc)).num_milliseconds().abs() < window_ms,
        Err(_) => false,
    }
}

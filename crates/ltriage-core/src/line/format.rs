//! Producing side of the run-log contract.

use super::{FETCH_ATTEMPT_PREFIX, RETRY_COUNTER_MARKER, SESSION_START_PREFIX};

/// Marker line opening the session of `owner`.
pub fn session_start_line(owner: &str) -> String {
    format!("{}{}", SESSION_START_PREFIX, owner)
}

/// Line recorded before each fetch attempt; `remaining` counts this attempt.
pub fn fetch_attempt_line(url: &str, remaining: u32) -> String {
    format!(
        "{}{},{}{}",
        FETCH_ATTEMPT_PREFIX, url, RETRY_COUNTER_MARKER, remaining
    )
}

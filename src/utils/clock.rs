//! Unix-epoch helpers for the temporal claims

use crate::error::{Error, Result};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Whole seconds since the Unix epoch for `at`, truncated towards the past.
pub(crate) fn unix_seconds(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            // -0.5s truncates to -1, not 0
            if before.subsec_nanos() > 0 {
                -secs - 1
            } else {
                -secs
            }
        }
    }
}

/// The instant `seconds` after (or before, when negative) the Unix epoch.
///
/// Returns `None` when the instant is not representable on this platform.
pub(crate) fn from_unix_seconds(seconds: i64) -> Option<SystemTime> {
    let magnitude = Duration::from_secs(seconds.unsigned_abs());
    if seconds >= 0 {
        UNIX_EPOCH.checked_add(magnitude)
    } else {
        UNIX_EPOCH.checked_sub(magnitude)
    }
}

/// Add a signed number of seconds to a timestamp with overflow protection
pub(crate) fn offset(timestamp: i64, seconds: i64) -> Result<i64> {
    timestamp
        .checked_add(seconds)
        .ok_or(Error::TimestampOverflow)
}

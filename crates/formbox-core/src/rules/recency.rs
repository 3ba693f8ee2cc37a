use crate::time::{elapsed_millis, MILLIS_PER_DAY};
use chrono::{DateTime, Utc};

pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Created within the last [`RECENT_WINDOW_DAYS`] days, inclusive. Elapsed
/// time is measured in whole milliseconds, independent of the calendar.
pub fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    elapsed_millis(created_at, now) <= RECENT_WINDOW_DAYS * MILLIS_PER_DAY
}

pub fn days_elapsed(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    elapsed_millis(created_at, now).div_euclid(MILLIS_PER_DAY)
}

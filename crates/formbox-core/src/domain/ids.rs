use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Upper bound (exclusive) of the random offset added to the clock reading.
pub const ID_RANDOM_OFFSET: i64 = 1_000;

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl ContactId {
    /// Epoch milliseconds plus a small random offset. Ids issued by one
    /// process are strictly increasing, so rapid submissions never collide.
    pub fn generate() -> Self {
        let candidate = Utc::now().timestamp_millis() + rand::random_range(0..ID_RANDOM_OFFSET);
        let previous = LAST_ISSUED
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        Self(candidate.max(previous + 1))
    }

    pub fn from_raw(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

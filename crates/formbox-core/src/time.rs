use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

pub const MILLIS_PER_DAY: i64 = 86_400_000;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid datetime format: expected YYYY-MM-DD or YYYY-MM-DD HH:MM")]
    InvalidDateTime,
    #[error("ambiguous local time: {0}")]
    AmbiguousLocalTime(String),
}

/// Current instant, truncated to the millisecond precision stored on disk.
pub fn now_utc() -> DateTime<Utc> {
    truncate_millis(Utc::now())
}

pub fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

pub fn elapsed_millis(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.timestamp_millis() - since.timestamp_millis()
}

pub fn to_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `YYYY-MM` bucket of a timestamp, in local time.
pub fn month_key(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m").to_string()
}

pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn format_datetime(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn parse_local_timestamp(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).ok_or(TimeParseError::InvalidDate)?;
    parse_local(input, midnight)
}

/// Like [`parse_local_timestamp`], but a bare date resolves to the last
/// millisecond of that day so it can close an inclusive range.
pub fn parse_local_timestamp_end(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let end_of_day =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).ok_or(TimeParseError::InvalidDate)?;
    parse_local(input, end_of_day)
}

fn parse_local(input: &str, date_only_time: NaiveTime) -> Result<DateTime<Utc>, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return local_to_utc(date.and_time(date_only_time));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return local_to_utc(dt);
        }
    }

    Err(TimeParseError::InvalidDateTime)
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>, TimeParseError> {
    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| TimeParseError::AmbiguousLocalTime(naive.to_string()))?;
    Ok(local.with_timezone(&Utc))
}

/// Serde adapter writing ISO-8601 timestamps with millisecond precision and a
/// `Z` suffix. Any RFC 3339 offset is accepted when reading; sub-millisecond
/// digits are dropped on read so a decoded value re-serializes unchanged.
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_iso(*ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| super::truncate_millis(dt.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

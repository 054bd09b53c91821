use crate::errors::TimeError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a `YYYY-MM-DD` date into epoch milliseconds at UTC midnight.
pub fn date_to_timestamp_ms(date: &str) -> Result<i64, TimeError> {
    let parsed =
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| TimeError::InvalidDate {
            input: date.to_string(),
            source,
        })?;

    Ok(parsed.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

/// Inverse of [`date_to_timestamp_ms`], truncating to the UTC calendar date.
pub fn timestamp_ms_to_date(ms: i64) -> Result<String, TimeError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .ok_or(TimeError::OutOfRange(ms))
}

/// Convert milliseconds to human-readable UTC time.
pub fn format_time(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| format!("Invalid timestamp {}", ms))
}

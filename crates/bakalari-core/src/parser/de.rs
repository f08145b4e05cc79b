//! Serde helpers for the quirks of Bakaláři payloads
//!
//! - timestamps come as ISO-8601, usually with an offset
//! - optional strings are sometimes `""` instead of `null`
//! - lists are sometimes `null` instead of `[]`

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de::Error, Deserialize, Deserializer};

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2022-06-17T08:00:00+02:00`), a naive timestamp
/// (`2022-06-17T08:00:00`, read as UTC) or a bare date (midnight UTC).
///
/// # Examples
/// ```
/// use bakalari_core::parser::parse_datetime;
///
/// let dt = parse_datetime("2022-06-17T08:00:00+02:00").unwrap();
/// assert_eq!(dt.offset().local_minus_utc(), 7200);
/// assert!(parse_datetime("yesterday").is_none());
/// ```
pub fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Parse a calendar date from either a date or a timestamp.
///
/// The date part is taken as written, ignoring the offset.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(text).map(|dt| dt.date_naive()))
}

pub fn datetime<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_datetime(&text).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {text}")))
}

pub fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(deserializer)? {
        Some(text) => parse_datetime(&text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {text}"))),
        None => Ok(None),
    }
}

pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_date(&text).ok_or_else(|| D::Error::custom(format!("invalid date: {text}")))
}

/// `null` and `""` both become `None`.
pub fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Like `non_empty`, but surrounding whitespace is dropped first.
pub fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

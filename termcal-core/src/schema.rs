//! Shared helpers for the JSON wire schemas.
//!
//! Every input file may carry a `$version` marker field, stripped before
//! the payload is interpreted. Period and subject identifiers may appear
//! as JSON numbers or strings and are normalized to string keys.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{TermcalError, TermcalResult};

/// Schema-version marker field carried by input files.
pub const VERSION_KEY: &str = "$version";

/// Read the schema version of a raw input value. An absent marker means
/// version 1 (legacy).
pub fn schema_version(value: &Value) -> i64 {
    value.get(VERSION_KEY).and_then(Value::as_i64).unwrap_or(1)
}

/// Remove the `$version` marker from an object, if present.
pub fn strip_version(value: &mut Value) {
    if let Value::Object(map) = value {
        map.remove(VERSION_KEY);
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_iso_date(s: &str) -> TermcalResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TermcalError::InvalidDate(s.to_string()))
}

/// Parse an `HH:MM` time-of-day string.
pub fn parse_wall_time(s: &str) -> TermcalResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| TermcalError::InvalidTime(s.to_string()))
}

/// ISO weekday of a date: 1 = Monday .. 7 = Sunday.
pub fn iso_weekday(date: NaiveDate) -> i64 {
    date.weekday().number_from_monday() as i64
}

/// Deserialize an identifier that may be a JSON number or a string into
/// a plain string key.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

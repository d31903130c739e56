//! Per-date override directives.
//!
//! A directive always consumes its day: when resolution fails, the day
//! produces no events and never falls back to the normal timetable.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::error::TermcalResult;
use crate::schema::{self, parse_iso_date};

/// Weekday bounds for full-day reschedules (ISO, 1 = Monday).
pub const WEEKDAY_MIN: i64 = 1;
pub const WEEKDAY_MAX: i64 = 7;

/// One substituted class in a per-period override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverrideEntry {
    #[serde(deserialize_with = "schema::id_string")]
    pub period: String,
    #[serde(deserialize_with = "schema::id_string")]
    pub subject: String,
}

/// Directive attached to a single date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOverride {
    /// Full-day substitution by another weekday's entries. The raw
    /// `use_weekday` value is validated when the day is resolved.
    Reschedule(Value),
    /// Explicit per-period substitution list, emitted unconditionally
    /// with no weekday matching.
    Periods(Vec<OverrideEntry>),
    /// Unrecognized directive shape; warns when the day is resolved.
    Invalid,
}

impl DayOverride {
    fn from_raw(raw: Value) -> TermcalResult<Self> {
        Ok(match raw {
            Value::Object(mut map) => match map.remove("use_weekday") {
                Some(weekday) => DayOverride::Reschedule(weekday),
                None => DayOverride::Invalid,
            },
            Value::Array(items) => DayOverride::Periods(serde_json::from_value(Value::Array(items))?),
            _ => DayOverride::Invalid,
        })
    }
}

/// Date → directive table. At most one directive exists per date.
#[derive(Debug, Default)]
pub struct OverrideTable {
    directives: BTreeMap<NaiveDate, DayOverride>,
}

impl OverrideTable {
    /// Build the table from raw override data, stripping the optional
    /// `$version` marker. Unparseable date keys warn and are dropped.
    pub fn from_value(mut value: Value, diag: &mut Diagnostics) -> TermcalResult<Self> {
        schema::strip_version(&mut value);

        let Value::Object(map) = value else {
            if !value.is_null() {
                diag.warn("Override data is not an object, ignoring");
            }
            return Ok(Self::default());
        };

        let mut directives = BTreeMap::new();
        for (key, raw) in map {
            let date = match parse_iso_date(&key) {
                Ok(date) => date,
                Err(_) => {
                    diag.warn(format!("Invalid date key '{key}' in overrides, ignoring"));
                    continue;
                }
            };
            directives.insert(date, DayOverride::from_raw(raw)?);
        }
        Ok(OverrideTable { directives })
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayOverride> {
        self.directives.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.directives.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Validate a full-day reschedule's source weekday: an integer or
/// numeric string in 1–7. Anything else warns and returns `None`, which
/// consumes the day without events.
pub fn resolve_source_weekday(
    raw: &Value,
    day: NaiveDate,
    diag: &mut Diagnostics,
) -> Option<i64> {
    let weekday = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(weekday) = weekday else {
        diag.warn(format!(
            "Invalid use_weekday value in override for {day}, skipping"
        ));
        return None;
    };
    if !(WEEKDAY_MIN..=WEEKDAY_MAX).contains(&weekday) {
        diag.warn(format!(
            "use_weekday must be between {WEEKDAY_MIN} and {WEEKDAY_MAX} in override for {day}, skipping"
        ));
        return None;
    }
    Some(weekday)
}

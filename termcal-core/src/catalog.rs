//! Period and subject reference data.

use std::collections::HashMap;

use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::TermcalResult;
use crate::schema::{self, parse_wall_time};

/// A named time-of-day slot shared by all weekdays.
///
/// No ordering constraint between start and end is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Period id → time slot, loaded once per run.
#[derive(Debug, Default)]
pub struct PeriodCatalog {
    periods: HashMap<String, Period>,
}

impl PeriodCatalog {
    /// Build the catalog from raw period data, stripping the optional
    /// `$version` marker. Unparseable times are fatal.
    pub fn from_value(mut value: Value) -> TermcalResult<Self> {
        schema::strip_version(&mut value);

        #[derive(Deserialize)]
        struct RawPeriod {
            start: String,
            end: String,
        }

        let raw: HashMap<String, RawPeriod> = serde_json::from_value(value)?;
        let mut periods = HashMap::with_capacity(raw.len());
        for (id, p) in raw {
            periods.insert(
                id,
                Period {
                    start: parse_wall_time(&p.start)?,
                    end: parse_wall_time(&p.end)?,
                },
            );
        }
        Ok(PeriodCatalog { periods })
    }

    pub fn get(&self, id: &str) -> Option<&Period> {
        self.periods.get(id)
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Subject id → display name, loaded once per run.
///
/// Missing lookups are handled by the caller, which falls back to the
/// identifier itself as the display name.
#[derive(Debug, Default)]
pub struct SubjectCatalog {
    subjects: HashMap<String, String>,
}

impl SubjectCatalog {
    /// Build the catalog from raw subject data, stripping the optional
    /// `$version` marker.
    pub fn from_value(mut value: Value) -> TermcalResult<Self> {
        schema::strip_version(&mut value);
        let subjects: HashMap<String, String> = serde_json::from_value(value)?;
        Ok(SubjectCatalog { subjects })
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.subjects.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_catalog_parses_wall_times() {
        let catalog = PeriodCatalog::from_value(json!({
            "1": {"start": "08:00", "end": "08:45"},
            "2": {"start": "09:00", "end": "09:45"},
        }))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let period = catalog.get("1").expect("period 1 should exist");
        assert_eq!(period.start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(period.end, NaiveTime::from_hms_opt(8, 45, 0).unwrap());
        assert!(catalog.get("3").is_none());
    }

    #[test]
    fn test_period_catalog_strips_version_marker() {
        let catalog = PeriodCatalog::from_value(json!({
            "$version": 1,
            "1": {"start": "08:00", "end": "08:45"},
        }))
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("$version").is_none());
    }

    #[test]
    fn test_period_catalog_rejects_bad_time() {
        let result = PeriodCatalog::from_value(json!({
            "1": {"start": "8 o'clock", "end": "08:45"},
        }));
        assert!(result.is_err(), "malformed time must be fatal");
    }

    #[test]
    fn test_subject_catalog_lookup() {
        let catalog = SubjectCatalog::from_value(json!({
            "$version": 1,
            "math": "Mathematics",
        }))
        .unwrap();

        assert_eq!(catalog.get("math"), Some("Mathematics"));
        assert_eq!(catalog.get("art"), None);
        assert_eq!(catalog.len(), 1);
    }
}

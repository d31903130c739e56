//! Timetable entries and the two configuration schema generations.
//!
//! Version 1 is a single entry list implicitly valid over the default
//! term range. Version 2 is a list of named sub-configurations, each
//! referencing an entry file and carrying an explicit validity window
//! plus visibility settings. Both normalize into [`TimetableConfig`].

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::defaults::TermDefaults;
use crate::diagnostics::Diagnostics;
use crate::error::{TermcalError, TermcalResult};
use crate::schema::{self, parse_iso_date};

/// Label used for the legacy single-timetable config in messages.
const LEGACY_LABEL: &str = "timetable";

/// One recurring weekly class: (weekday, period, subject).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimetableEntry {
    /// ISO weekday, 1 = Monday. Out-of-range values never match a date.
    pub weekday: i64,
    #[serde(deserialize_with = "schema::id_string")]
    pub period: String,
    #[serde(deserialize_with = "schema::id_string")]
    pub subject: String,
}

/// A normalized timetable configuration: entries bound to a validity
/// window and a visibility policy.
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    /// Referenced file name, or a built-in marker for the legacy path.
    pub label: String,
    pub entries: Vec<TimetableEntry>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub visible_weeks: i64,
    pub visible_days: i64,
    pub ignore_past_days: bool,
}

/// Source of referenced timetable entry files.
///
/// File I/O is owned by the caller; tests substitute an in-memory map.
pub trait TimetableSource {
    fn load(&self, file: &str) -> TermcalResult<Value>;
}

/// Extract the entry list from a raw value, accepting either a bare
/// list or a `{"timetable": [...]}` wrapper.
pub fn entry_list(value: Value) -> TermcalResult<Vec<TimetableEntry>> {
    let inner = match value {
        Value::Object(mut map) => match map.remove("timetable") {
            Some(list) => list,
            None => Value::Object(map),
        },
        other => other,
    };
    Ok(serde_json::from_value(inner)?)
}

#[derive(Deserialize)]
struct RawSubConfig {
    file: String,
    start: String,
    end: String,
    #[serde(default = "default_visible_weeks")]
    visible_weeks: i64,
    #[serde(default)]
    visible_days: i64,
    #[serde(default)]
    ignore_past_days: bool,
}

fn default_visible_weeks() -> i64 {
    2
}

/// Normalize both schema generations into a uniform config list.
///
/// A `$version` of 2 with a `timetables` list takes the versioned path;
/// anything else is treated as a legacy single timetable bound to the
/// default term range.
pub fn load_timetable_configs(
    mut main: Value,
    source: &dyn TimetableSource,
    defaults: &TermDefaults,
    diag: &mut Diagnostics,
) -> TermcalResult<Vec<TimetableConfig>> {
    if schema::schema_version(&main) == 2 {
        if let Value::Object(ref mut map) = main {
            if let Some(subs) = map.remove("timetables") {
                return load_versioned(subs, source, diag);
            }
        }
    }

    // Version 1: single entry list valid over the default term range.
    Ok(vec![TimetableConfig {
        label: LEGACY_LABEL.to_string(),
        entries: entry_list(main)?,
        start: defaults.term_start,
        end: defaults.term_end,
        visible_weeks: 2,
        visible_days: 0,
        ignore_past_days: false,
    }])
}

fn load_versioned(
    subs: Value,
    source: &dyn TimetableSource,
    diag: &mut Diagnostics,
) -> TermcalResult<Vec<TimetableConfig>> {
    let raw: Vec<RawSubConfig> = serde_json::from_value(subs)?;

    let mut configs = Vec::with_capacity(raw.len());
    for sub in raw {
        let start = parse_iso_date(&sub.start)?;
        let end = parse_iso_date(&sub.end)?;
        if start > end {
            return Err(TermcalError::Config(format!(
                "Invalid date range in {}: start date {} is after end date {}",
                sub.file, sub.start, sub.end
            )));
        }

        let entries = entry_list(source.load(&sub.file)?)?;
        configs.push(TimetableConfig {
            label: sub.file,
            entries,
            start,
            end,
            visible_weeks: sub.visible_weeks,
            visible_days: sub.visible_days,
            ignore_past_days: sub.ignore_past_days,
        });
    }

    warn_overlaps(&configs, diag);
    Ok(configs)
}

/// All-pairs overlap check on the configured validity windows. Overlaps
/// are permitted; each offending pair is reported once.
fn warn_overlaps(configs: &[TimetableConfig], diag: &mut Diagnostics) {
    for i in 0..configs.len() {
        for j in (i + 1)..configs.len() {
            let (a, b) = (&configs[i], &configs[j]);
            if a.start <= b.end && b.start <= a.end {
                diag.warn(format!(
                    "Overlapping date ranges detected between timetable {i} ({} to {}) and timetable {j} ({} to {})",
                    a.start, a.end, b.start, b.end
                ));
            }
        }
    }
}

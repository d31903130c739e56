//! Holiday exclusion rules.
//!
//! Three wire shapes are accepted and resolved into one canonical rule
//! list at load time:
//! - legacy map: `{"YYYY-MM-DD": true}` marking single holiday dates
//! - bare rule list
//! - `{"holidays": [...]}` wrapper around a rule list
//!
//! A rule is a single date or an inclusive date range, optionally
//! restricted to a set of ISO weekdays. Malformed rules warn once at
//! load and are dropped; they can never match.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::error::TermcalResult;
use crate::schema::{self, iso_weekday, parse_iso_date};

#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleDates {
    Single(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

/// One canonical holiday rule: a date condition plus an optional
/// weekday filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRule {
    dates: RuleDates,
    weekdays: Option<Vec<i64>>,
}

impl HolidayRule {
    fn matches(&self, date: NaiveDate) -> bool {
        let date_ok = match self.dates {
            RuleDates::Single(d) => d == date,
            RuleDates::Range { start, end } => start <= date && date <= end,
        };
        if !date_ok {
            return false;
        }
        match &self.weekdays {
            Some(allowed) => allowed.contains(&iso_weekday(date)),
            None => true,
        }
    }
}

#[derive(Deserialize)]
struct RawRule {
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    filter: Option<RawFilter>,
}

#[derive(Deserialize)]
struct RawFilter {
    weekday: Option<WeekdayFilter>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeekdayFilter {
    One(i64),
    Many(Vec<i64>),
}

/// The full holiday exclusion set for a run.
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    rules: Vec<HolidayRule>,
}

impl HolidayCalendar {
    /// Resolve any of the three wire shapes into canonical rules,
    /// stripping the optional `$version` marker.
    pub fn from_value(mut value: Value, diag: &mut Diagnostics) -> TermcalResult<Self> {
        schema::strip_version(&mut value);

        let rules = match value {
            Value::Object(mut map) => {
                if let Some(list) = map.remove("holidays") {
                    match list {
                        Value::Array(items) => parse_rules(items, diag)?,
                        // A wrapper without a list holds no rules.
                        _ => Vec::new(),
                    }
                } else {
                    legacy_map_rules(map, diag)
                }
            }
            Value::Array(items) => parse_rules(items, diag)?,
            _ => Vec::new(),
        };
        Ok(HolidayCalendar { rules })
    }

    /// True if any rule excludes the given date.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.rules.iter().any(|rule| rule.matches(date))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Legacy map shape: a date key flagged `true` is a holiday.
fn legacy_map_rules(
    map: serde_json::Map<String, Value>,
    diag: &mut Diagnostics,
) -> Vec<HolidayRule> {
    let mut rules = Vec::new();
    for (key, flag) in map {
        if flag.as_bool() != Some(true) {
            continue;
        }
        match parse_iso_date(&key) {
            Ok(date) => rules.push(HolidayRule {
                dates: RuleDates::Single(date),
                weekdays: None,
            }),
            Err(_) => diag.warn(format!("Invalid date key '{key}' in holiday map, ignoring")),
        }
    }
    rules
}

fn parse_rules(items: Vec<Value>, diag: &mut Diagnostics) -> TermcalResult<Vec<HolidayRule>> {
    let mut rules = Vec::with_capacity(items.len());
    for item in items {
        let raw: RawRule = match serde_json::from_value(item.clone()) {
            Ok(raw) => raw,
            Err(_) => {
                diag.warn(format!("Malformed holiday entry: {item}"));
                continue;
            }
        };

        // A single date takes precedence over a range when both appear.
        let dates = match (raw.date, raw.start, raw.end) {
            (Some(date), _, _) => RuleDates::Single(parse_iso_date(&date)?),
            (None, Some(start), Some(end)) => {
                let (start, end) = (parse_iso_date(&start)?, parse_iso_date(&end)?);
                if start > end {
                    diag.warn(format!(
                        "Malformed holiday entry (start date after end date): {item}"
                    ));
                    continue;
                }
                RuleDates::Range { start, end }
            }
            _ => {
                diag.warn(format!(
                    "Malformed holiday entry (missing date or start/end): {item}"
                ));
                continue;
            }
        };

        let weekdays = raw.filter.and_then(|f| f.weekday).map(|w| match w {
            WeekdayFilter::One(day) => vec![day],
            WeekdayFilter::Many(days) => days,
        });

        rules.push(HolidayRule { dates, weekdays });
    }
    Ok(rules)
}

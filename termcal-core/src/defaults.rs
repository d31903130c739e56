//! Default term date range for legacy timetable configs.

use chrono::NaiveDate;

use crate::diagnostics::Diagnostics;
use crate::schema::parse_iso_date;

/// Environment variable overriding the legacy term start date.
pub const START_DATE_VAR: &str = "DEFAULT_START_DATE";
/// Environment variable overriding the legacy term end date.
pub const END_DATE_VAR: &str = "DEFAULT_END_DATE";

/// Validity window applied to legacy (version 1) timetable configs,
/// which carry no explicit term range of their own.
///
/// Built once at process start and passed down by parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermDefaults {
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
}

impl Default for TermDefaults {
    /// Built-in fallback range: Spring 2025.
    fn default() -> Self {
        TermDefaults {
            term_start: NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
            term_end: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
        }
    }
}

impl TermDefaults {
    /// Build the defaults from the environment. An invalid value warns
    /// and falls back to the built-in range; a missing value falls back
    /// silently.
    pub fn from_env(diag: &mut Diagnostics) -> Self {
        let fallback = Self::default();
        TermDefaults {
            term_start: resolve_date(
                START_DATE_VAR,
                std::env::var(START_DATE_VAR).ok().as_deref(),
                fallback.term_start,
                diag,
            ),
            term_end: resolve_date(
                END_DATE_VAR,
                std::env::var(END_DATE_VAR).ok().as_deref(),
                fallback.term_end,
                diag,
            ),
        }
    }
}

/// Resolve one environment date override against its fallback.
fn resolve_date(
    var: &str,
    raw: Option<&str>,
    fallback: NaiveDate,
    diag: &mut Diagnostics,
) -> NaiveDate {
    match raw {
        Some(s) => match parse_iso_date(s) {
            Ok(date) => date,
            Err(_) => {
                diag.warn(format!(
                    "Invalid env var {var} (expected YYYY-MM-DD); using default {fallback}"
                ));
                fallback
            }
        },
        None => fallback,
    }
}

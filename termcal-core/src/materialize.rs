//! Day-by-day event materialization.
//!
//! Each day resolves through three mutually exclusive branches in fixed
//! priority order: holiday first, override second, normal timetable
//! last. A holiday always wins, even when an override targets the same
//! date. Entry-level failures skip only the affected entry; they never
//! abort the day or the run.

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::{PeriodCatalog, SubjectCatalog};
use crate::diagnostics::Diagnostics;
use crate::holidays::HolidayCalendar;
use crate::overrides::{self, DayOverride, OverrideTable};
use crate::schema::iso_weekday;
use crate::timetable::TimetableConfig;
use crate::window::effective_range;

/// Domain suffix of every generated event identifier.
pub const UID_DOMAIN: &str = "yearcakes.timetable.school.ics";

/// One materialized calendar event, in floating local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub uid: String,
}

/// Deterministic event identifier. The same (date, period, subject)
/// triple always yields the same uid across runs.
pub fn event_uid(date: NaiveDate, period: &str, subject: &str) -> String {
    format!("{date}-{period}-{subject}@{UID_DOMAIN}")
}

/// Materializes events from normalized configs and canonical holiday
/// and override data.
pub struct Materializer<'a> {
    periods: &'a PeriodCatalog,
    subjects: &'a SubjectCatalog,
    holidays: &'a HolidayCalendar,
    overrides: &'a OverrideTable,
}

impl<'a> Materializer<'a> {
    pub fn new(
        periods: &'a PeriodCatalog,
        subjects: &'a SubjectCatalog,
        holidays: &'a HolidayCalendar,
        overrides: &'a OverrideTable,
    ) -> Self {
        Materializer {
            periods,
            subjects,
            holidays,
            overrides,
        }
    }

    /// Walk every configuration's effective range and emit its events.
    /// Overlapping ranges are processed independently and may produce
    /// duplicates.
    pub fn run(
        &self,
        configs: &[TimetableConfig],
        today: NaiveDate,
        diag: &mut Diagnostics,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        for config in configs {
            let Some(span) = effective_range(config, today, self.overrides) else {
                continue;
            };
            for date in span.days() {
                self.materialize_day(config, date, &mut events, diag);
            }
        }
        events
    }

    fn materialize_day(
        &self,
        config: &TimetableConfig,
        date: NaiveDate,
        events: &mut Vec<Event>,
        diag: &mut Diagnostics,
    ) {
        if self.holidays.is_holiday(date) {
            return;
        }

        if let Some(directive) = self.overrides.get(date) {
            self.apply_override(directive, config, date, events, diag);
            return;
        }

        let weekday = iso_weekday(date);
        for entry in &config.entries {
            if entry.weekday == weekday {
                self.push_event(&entry.period, &entry.subject, date, "timetable", events, diag);
            }
        }
    }

    fn apply_override(
        &self,
        directive: &DayOverride,
        config: &TimetableConfig,
        date: NaiveDate,
        events: &mut Vec<Event>,
        diag: &mut Diagnostics,
    ) {
        match directive {
            DayOverride::Reschedule(raw) => {
                let Some(source_weekday) = overrides::resolve_source_weekday(raw, date, diag)
                else {
                    return;
                };
                let mut added = 0usize;
                for entry in &config.entries {
                    if entry.weekday == source_weekday
                        && self.push_event(
                            &entry.period,
                            &entry.subject,
                            date,
                            "reschedule",
                            events,
                            diag,
                        )
                    {
                        added += 1;
                    }
                }
                if added == 0 {
                    diag.warn(format!(
                        "No timetable entries found for weekday {source_weekday} in reschedule for {date}"
                    ));
                }
            }
            DayOverride::Periods(list) => {
                for item in list {
                    self.push_event(&item.period, &item.subject, date, "override", events, diag);
                }
            }
            DayOverride::Invalid => {
                diag.warn(format!("Invalid override format for {date}, skipping"));
            }
        }
    }

    /// Materialize a single (period, subject, date) triple. A missing
    /// period skips only this entry; a missing subject falls back to
    /// the identifier as the display name.
    fn push_event(
        &self,
        period_id: &str,
        subject_id: &str,
        date: NaiveDate,
        context: &str,
        events: &mut Vec<Event>,
        diag: &mut Diagnostics,
    ) -> bool {
        let Some(period) = self.periods.get(period_id) else {
            diag.warn(format!(
                "Period {period_id} not found in {context} for {date}, skipping"
            ));
            return false;
        };
        let name = match self.subjects.get(subject_id) {
            Some(name) => name.to_string(),
            None => {
                diag.warn(format!(
                    "Subject {subject_id} not found in subjects.json for {context} on {date}"
                ));
                subject_id.to_string()
            }
        };
        events.push(Event {
            name,
            start: date.and_time(period.start),
            end: date.and_time(period.end),
            uid: event_uid(date, period_id, subject_id),
        });
        true
    }
}

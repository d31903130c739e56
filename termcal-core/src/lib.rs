//! Core logic for termcal: date-range resolution and event
//! materialization for a recurring school timetable.
//!
//! The crate turns weekly timetable templates, holiday exclusions and
//! per-date overrides into the exact set of calendar events to publish.
//! File loading and output writing are owned by the caller: every input
//! arrives here as already-parsed JSON, and the result leaves as a list
//! of [`Event`]s (or a serialized calendar via [`ics::build_calendar`]).

pub mod catalog;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod holidays;
pub mod ics;
pub mod materialize;
pub mod overrides;
pub mod schema;
pub mod timetable;
pub mod window;

pub use catalog::{Period, PeriodCatalog, SubjectCatalog};
pub use defaults::TermDefaults;
pub use diagnostics::Diagnostics;
pub use error::{TermcalError, TermcalResult};
pub use holidays::HolidayCalendar;
pub use materialize::{Event, Materializer};
pub use overrides::{DayOverride, OverrideEntry, OverrideTable};
pub use timetable::{load_timetable_configs, TimetableConfig, TimetableEntry, TimetableSource};
pub use window::{effective_range, DateSpan};

//! JSON input loading.
//!
//! The core consumes parsed JSON values; this module owns the file
//! mechanics and hands every input through the core's normalizers. Any
//! unreadable or unparseable required file is fatal.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use termcal_core::{
    load_timetable_configs, Diagnostics, HolidayCalendar, OverrideTable, PeriodCatalog,
    SubjectCatalog, TermDefaults, TermcalError, TermcalResult, TimetableConfig, TimetableSource,
};

/// Well-known input file names inside the data directory.
pub const PERIODS_FILE: &str = "periods.json";
pub const SUBJECTS_FILE: &str = "subjects.json";
pub const TIMETABLE_FILE: &str = "timetable.json";
pub const HOLIDAYS_FILE: &str = "holidays.json";
pub const OVERRIDES_FILE: &str = "overrides.json";

/// All normalized inputs for one run.
pub struct Inputs {
    pub periods: PeriodCatalog,
    pub subjects: SubjectCatalog,
    pub configs: Vec<TimetableConfig>,
    pub holidays: HolidayCalendar,
    pub overrides: OverrideTable,
}

/// Load and parse one JSON file.
pub fn load_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Loads referenced timetable files from the filesystem. Paths resolve
/// as given, relative to the working directory; `--data-dir` only moves
/// the five well-known inputs.
pub struct FsTimetableSource;

impl TimetableSource for FsTimetableSource {
    fn load(&self, file: &str) -> TermcalResult<Value> {
        let content = std::fs::read_to_string(file)
            .map_err(|e| TermcalError::TimetableFile(file.to_string(), e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| TermcalError::TimetableFile(file.to_string(), e.to_string()))
    }
}

/// Load the five inputs and normalize them into canonical types.
pub fn load_inputs(
    data_dir: &Path,
    defaults: &TermDefaults,
    diag: &mut Diagnostics,
) -> Result<Inputs> {
    let periods = PeriodCatalog::from_value(load_json(&data_dir.join(PERIODS_FILE))?)
        .context("Invalid periods data")?;
    let subjects = SubjectCatalog::from_value(load_json(&data_dir.join(SUBJECTS_FILE))?)
        .context("Invalid subjects data")?;
    let configs = load_timetable_configs(
        load_json(&data_dir.join(TIMETABLE_FILE))?,
        &FsTimetableSource,
        defaults,
        diag,
    )
    .context("Invalid timetable configuration")?;
    let holidays = HolidayCalendar::from_value(load_json(&data_dir.join(HOLIDAYS_FILE))?, diag)
        .context("Invalid holiday data")?;
    let overrides = OverrideTable::from_value(load_json(&data_dir.join(OVERRIDES_FILE))?, diag)
        .context("Invalid override data")?;

    Ok(Inputs {
        periods,
        subjects,
        configs,
        holidays,
        overrides,
    })
}

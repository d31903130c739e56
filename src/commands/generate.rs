//! `termcal generate` - produce the ICS feed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use termcal_core::{ics, Diagnostics, Materializer, TermDefaults};

use crate::config::{Paths, TermcalConfig, DEFAULT_CONFIG_FILE};
use crate::{input, output};

pub fn run(
    data_dir: Option<PathBuf>,
    output_path: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    today: Option<String>,
) -> Result<()> {
    let config = TermcalConfig::load(&config_path.unwrap_or_else(|| DEFAULT_CONFIG_FILE.into()))?;
    let paths = Paths::resolve(&config, data_dir, output_path, static_dir);

    let today = match today {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("Invalid --today value '{s}' (expected YYYY-MM-DD)"))?,
        None => Local::now().date_naive(),
    };

    let mut diag = Diagnostics::new();
    let defaults = TermDefaults::from_env(&mut diag);
    let inputs = input::load_inputs(&paths.data_dir, &defaults, &mut diag)?;

    let materializer = Materializer::new(
        &inputs.periods,
        &inputs.subjects,
        &inputs.holidays,
        &inputs.overrides,
    );
    let events = materializer.run(&inputs.configs, today, &mut diag);

    let calendar = ics::build_calendar(&events, Utc::now());
    output::write_ics(&paths.output, &calendar)?;

    let output_dir = paths.output.parent().unwrap_or_else(|| Path::new("."));
    output::copy_static_assets(&paths.static_dir, output_dir, &mut diag);

    println!("ICS file generated: {}", paths.output.display());

    Ok(())
}

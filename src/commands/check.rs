//! `termcal check` - validate the inputs without writing output.
//!
//! Loads and normalizes all five inputs through the same code paths as
//! `generate`, then reports the collected warnings. Structural problems
//! (bad date ordering, unreadable or unparseable files) propagate and
//! exit non-zero; warnings alone exit zero.

use std::path::PathBuf;

use anyhow::Result;
use termcal_core::{Diagnostics, TermDefaults};

use crate::config::{Paths, TermcalConfig, DEFAULT_CONFIG_FILE};
use crate::input;

pub fn run(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = TermcalConfig::load(&config_path.unwrap_or_else(|| DEFAULT_CONFIG_FILE.into()))?;
    let paths = Paths::resolve(&config, data_dir, None, None);

    let mut diag = Diagnostics::new();
    let defaults = TermDefaults::from_env(&mut diag);
    let inputs = input::load_inputs(&paths.data_dir, &defaults, &mut diag)?;

    println!("Periods: {}", inputs.periods.len());
    println!("Subjects: {}", inputs.subjects.len());
    println!("Timetable configs: {}", inputs.configs.len());
    for config in &inputs.configs {
        println!(
            "  {}: {} entries, {} to {}",
            config.label,
            config.entries.len(),
            config.start,
            config.end
        );
    }
    println!("Holiday rules: {}", inputs.holidays.len());
    println!("Overrides: {}", inputs.overrides.len());

    if diag.is_empty() {
        println!("No warnings.");
    } else {
        println!("\n{} warning(s):", diag.count());
        for warning in diag.warnings() {
            println!("  {warning}");
        }
    }

    Ok(())
}

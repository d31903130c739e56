//! ICS writing and static asset copying.

use std::path::Path;

use anyhow::{Context, Result};
use termcal_core::Diagnostics;

/// Write the ICS content, creating parent directories as needed.
pub fn write_ics(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Copy every regular file from the static directory (e.g. a CNAME
/// file) into the output directory. Best-effort: each failure warns and
/// the run continues.
pub fn copy_static_assets(static_dir: &Path, output_dir: &Path, diag: &mut Diagnostics) {
    if !static_dir.is_dir() {
        return;
    }

    let entries = match std::fs::read_dir(static_dir) {
        Ok(entries) => entries,
        Err(e) => {
            diag.warn(format!(
                "Failed to list static dir '{}': {e}",
                static_dir.display()
            ));
            return;
        }
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let src = entry.path();
        if !src.is_file() {
            continue;
        }
        let dest = output_dir.join(entry.file_name());
        if let Err(e) = std::fs::copy(&src, &dest) {
            diag.warn(format!(
                "Failed to copy static asset '{}' to '{}': {e}",
                src.display(),
                dest.display()
            ));
        }
    }
}

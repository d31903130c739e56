//! Optional repo-local termcal.toml.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default locations, matching the original repository layout.
pub const DEFAULT_CONFIG_FILE: &str = "termcal.toml";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT: &str = "_site/calendar.ics";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Settings read from termcal.toml. A missing file means defaults.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TermcalConfig {
    pub data_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

impl TermcalConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

/// Resolved locations for one run: flag > config file > default.
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub static_dir: PathBuf,
}

impl Paths {
    pub fn resolve(
        config: &TermcalConfig,
        data_dir: Option<PathBuf>,
        output: Option<PathBuf>,
        static_dir: Option<PathBuf>,
    ) -> Self {
        Paths {
            data_dir: data_dir
                .or_else(|| config.data_dir.clone())
                .unwrap_or_else(|| DEFAULT_DATA_DIR.into()),
            output: output
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| DEFAULT_OUTPUT.into()),
            static_dir: static_dir
                .or_else(|| config.static_dir.clone())
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TermcalConfig::load(&dir.path().join("termcal.toml")).unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.output.is_none());
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_config_file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termcal.toml");
        std::fs::write(&path, "data_dir = \"school-data\"\noutput = \"out/cal.ics\"\n").unwrap();

        let config = TermcalConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("school-data")));
        assert_eq!(config.output, Some(PathBuf::from("out/cal.ics")));
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termcal.toml");
        std::fs::write(&path, "data_dir = [not toml").unwrap();
        assert!(TermcalConfig::load(&path).is_err());
    }

    #[test]
    fn test_paths_precedence_flag_beats_file_beats_default() {
        let config = TermcalConfig {
            data_dir: Some("from-file".into()),
            output: Some("from-file.ics".into()),
            static_dir: None,
        };

        let paths = Paths::resolve(&config, Some("from-flag".into()), None, None);
        assert_eq!(paths.data_dir, PathBuf::from("from-flag"));
        assert_eq!(paths.output, PathBuf::from("from-file.ics"));
        assert_eq!(paths.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
    }
}

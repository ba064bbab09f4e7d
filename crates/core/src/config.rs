//! Configuration structures for the histdata system.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::DateWindow;

/// Main configuration for both pipelines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Primary (HTML table) extraction configuration.
    pub extract: ExtractConfig,
    /// Secondary-source merge configuration.
    pub merge: MergeConfig,
}

impl Config {
    /// Load a configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipelines cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.merge.window.validate()
    }
}

/// Primary extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// HTML export to read.
    pub input: PathBuf,
    /// Monthly dataset to write.
    pub output: PathBuf,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("docs/raw/qld-history.html"),
            output: PathBuf::from("data/qld-history.json"),
        }
    }
}

/// How secondary entries combine with months already in the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Secondary entries replace existing months.
    #[default]
    Override,
    /// Secondary entries only fill months the dataset lacks.
    FillMissing,
}

/// Secondary-source merge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Line-oriented secondary export.
    pub source: PathBuf,
    /// Monthly dataset to update in place.
    pub target: PathBuf,
    /// Inclusive window the secondary source is authoritative for.
    pub window: DateWindow,
    /// Conflict policy.
    pub policy: MergePolicy,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("docs/raw/qld-deducted.csv"),
            target: PathBuf::from("data/qld-history.json"),
            window: DateWindow::default(),
            policy: MergePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.extract.input,
            PathBuf::from("docs/raw/qld-history.html")
        );
        assert_eq!(config.extract.output, PathBuf::from("data/qld-history.json"));
        assert_eq!(config.merge.policy, MergePolicy::Override);
        assert_eq!(
            config.merge.window.start,
            NaiveDate::from_ymd_opt(2000, 3, 1).unwrap()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "merge": {{ "policy": "fill_missing", "window": {{ "start": "2001-01-01", "end": "2002-12-31" }} }} }}"#
        )
        .unwrap();

        let config = Config::from_json_file(file.path()).unwrap();
        assert_eq!(config.merge.policy, MergePolicy::FillMissing);
        assert!(config.merge.window.contains("2002-12-31"));
        assert_eq!(config.merge.source, PathBuf::from("docs/raw/qld-deducted.csv"));
        assert_eq!(config.extract.output, PathBuf::from("data/qld-history.json"));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "merge": {{ "window": {{ "start": "2010-01-01", "end": "2002-12-31" }} }} }}"#
        )
        .unwrap();

        assert!(matches!(
            Config::from_json_file(file.path()),
            Err(Error::Config(_))
        ));
    }
}

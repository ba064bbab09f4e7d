//! JSON persistence for monthly datasets.
//!
//! The dataset file is committed and reviewed as data, so it is written with
//! two-space indentation and non-ASCII characters left unescaped.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::MonthlyDataset;

/// Read a persisted dataset. Duplicate months resolve to the later entry.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<MonthlyDataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::file(path, e))?;
    let dataset: MonthlyDataset = serde_json::from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), months = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Write a dataset in full, creating parent directories as needed.
pub fn save_dataset(path: impl AsRef<Path>, dataset: &MonthlyDataset) -> Result<()> {
    save_json(path, dataset)
}

/// Write any serializable value as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
    }

    let file = File::create(path).map_err(|e| Error::file(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| Error::file(path, e))?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MonthlyRecord;

    #[test]
    fn test_save_creates_dirs_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("history.json");

        let dataset: MonthlyDataset = vec![
            MonthlyRecord::new("2021-04", 8.5, 9.25),
            MonthlyRecord::new("2021-03", 9.0, 11.0),
        ]
        .into();
        save_dataset(&path, &dataset).unwrap();

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded, dataset);
        assert_eq!(loaded.months().next(), Some("2021-03"));
    }

    #[test]
    fn test_pretty_output_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let dataset: MonthlyDataset = vec![MonthlyRecord::new("2021-03", 9.0, 11.0)].into();
        save_dataset(&path, &dataset).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"month\": \"2021-03\",\n    \"low\": 9.0,\n    \"close\": 11.0\n  }\n]"
        );
    }

    #[test]
    fn test_non_ascii_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        save_json(&path, &vec!["févr.", "déc."]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("févr."));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
    }

    #[test]
    fn test_load_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_dataset(&path), Err(Error::Json(_))));
    }
}

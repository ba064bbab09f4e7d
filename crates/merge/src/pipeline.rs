//! Secondary merge and instrument combine pipelines.

use histdata_core::config::MergeConfig;
use histdata_core::{store, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::combine::combine_histories;
use crate::merger::{merge_monthly, MergeSummary};
use crate::secondary::SecondaryParser;

/// Result of a successful merge run.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Months in the dataset before merging.
    pub loaded: usize,
    /// Distinct months found in the secondary source window.
    pub found: usize,
    /// What the merge did.
    pub summary: MergeSummary,
    /// Months in the dataset after merging.
    pub total: usize,
    /// Dataset path that was rewritten.
    pub target: PathBuf,
}

/// How a merge run ended. Missing files are early exits, not errors.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    Completed(MergeReport),
    /// Secondary source does not exist.
    SourceMissing(PathBuf),
    /// Dataset to merge into does not exist.
    TargetMissing(PathBuf),
}

/// Merge the secondary source into the persisted dataset and rewrite it.
pub fn run_merge(config: &MergeConfig) -> Result<MergeOutcome> {
    if !config.source.exists() {
        warn!(path = %config.source.display(), "secondary source not found");
        return Ok(MergeOutcome::SourceMissing(config.source.clone()));
    }
    if !config.target.exists() {
        warn!(path = %config.target.display(), "dataset not found");
        return Ok(MergeOutcome::TargetMissing(config.target.clone()));
    }

    let mut dataset = store::load_dataset(&config.target)?;
    let loaded = dataset.len();
    info!(months = loaded, path = %config.target.display(), "loaded dataset");

    let bytes = fs::read(&config.source).map_err(|e| Error::file(&config.source, e))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut parser = SecondaryParser::new(config.window)?;
    let entries = parser.parse(&text);
    let found = entries.len();
    let stats = parser.stats();
    debug!(
        lines = stats.lines_seen,
        undated = stats.undated_lines,
        outside_window = stats.outside_window,
        short_lines = stats.short_lines,
        defaulted_numbers = stats.defaulted_numbers,
        "secondary parse stats"
    );
    info!(
        months = found,
        start = %config.window.start,
        end = %config.window.end,
        "secondary months in window"
    );

    let summary = merge_monthly(&mut dataset, entries, config.policy);
    store::save_dataset(&config.target, &dataset)?;
    info!(
        added = summary.added,
        replaced = summary.replaced,
        kept = summary.kept,
        total = dataset.len(),
        "dataset updated"
    );

    Ok(MergeOutcome::Completed(MergeReport {
        loaded,
        found,
        summary,
        total: dataset.len(),
        target: config.target.clone(),
    }))
}

/// How a combine run ended.
#[derive(Debug, Clone)]
pub enum CombineOutcome {
    /// Rows written.
    Completed { rows: usize, output: PathBuf },
    /// One of the input datasets does not exist.
    InputMissing(PathBuf),
}

/// Join two persisted histories and write the market rows.
pub fn run_combine(base: &Path, leveraged: &Path, output: &Path) -> Result<CombineOutcome> {
    for path in [base, leveraged] {
        if !path.exists() {
            warn!(path = %path.display(), "dataset not found");
            return Ok(CombineOutcome::InputMissing(path.to_path_buf()));
        }
    }

    let base_history = store::load_dataset(base)?;
    let leveraged_history = store::load_dataset(leveraged)?;
    let rows = combine_histories(&base_history, &leveraged_history);

    store::save_json(output, &rows)?;
    info!(rows = rows.len(), output = %output.display(), "market rows written");

    Ok(CombineOutcome::Completed {
        rows: rows.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use histdata_core::config::MergePolicy;
    use histdata_core::{DateWindow, MonthlyDataset, MonthlyRecord};

    const SECONDARY: &str = "\
Date        Low     Close
2003-05-15  10.0    10.5
2003-06-16  11.123  11.987
2007-01-10  99.0    99.0
";

    fn setup(dir: &Path) -> MergeConfig {
        let target = dir.join("history.json");
        let existing: MonthlyDataset = vec![
            MonthlyRecord::new("2003-05", 1.0, 2.0),
            MonthlyRecord::new("2007-01", 5.0, 6.0),
        ]
        .into();
        store::save_dataset(&target, &existing).unwrap();

        let source = dir.join("deducted.csv");
        fs::write(&source, SECONDARY).unwrap();

        MergeConfig {
            source,
            target,
            window: DateWindow::default(),
            policy: MergePolicy::Override,
        }
    }

    #[test]
    fn test_merge_overrides_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());

        let report = match run_merge(&config).unwrap() {
            MergeOutcome::Completed(report) => report,
            other => panic!("expected completed merge, got {other:?}"),
        };
        assert_eq!(report.loaded, 2);
        assert_eq!(report.found, 2);
        assert_eq!(report.total, 3);

        let merged = store::load_dataset(&config.target).unwrap();
        assert_eq!(
            merged.into_records(),
            vec![
                MonthlyRecord::new("2003-05", 10.0, 10.5),
                MonthlyRecord::new("2003-06", 11.12, 11.99),
                // Outside the window: untouched.
                MonthlyRecord::new("2007-01", 5.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_merge_fill_missing_policy() {
        let dir = tempfile::tempdir().unwrap();
        let config = MergeConfig {
            policy: MergePolicy::FillMissing,
            ..setup(dir.path())
        };

        run_merge(&config).unwrap();

        let merged = store::load_dataset(&config.target).unwrap();
        assert_eq!(
            merged.get("2003-05"),
            Some(&MonthlyRecord::new("2003-05", 1.0, 2.0))
        );
        assert!(merged.contains("2003-06"));
    }

    #[test]
    fn test_missing_files_are_early_exits() {
        let dir = tempfile::tempdir().unwrap();
        let config = setup(dir.path());

        let no_source = MergeConfig {
            source: dir.path().join("absent.csv"),
            ..config.clone()
        };
        assert!(matches!(
            run_merge(&no_source).unwrap(),
            MergeOutcome::SourceMissing(_)
        ));

        let no_target = MergeConfig {
            target: dir.path().join("absent.json"),
            ..config
        };
        assert!(matches!(
            run_merge(&no_target).unwrap(),
            MergeOutcome::TargetMissing(_)
        ));
        assert!(!dir.path().join("absent.json").exists());
    }

    #[test]
    fn test_combine_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.json");
        let leveraged = dir.path().join("leveraged.json");
        let output = dir.path().join("market.json");

        let history: MonthlyDataset = vec![MonthlyRecord::new("2003-05", 1.0, 2.0)].into();
        store::save_dataset(&base, &history).unwrap();
        store::save_dataset(&leveraged, &history).unwrap();

        let outcome = run_combine(&base, &leveraged, &output).unwrap();
        assert!(matches!(outcome, CombineOutcome::Completed { rows: 1, .. }));

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("\"date\": \"2003-05-01\""));
    }

    #[test]
    fn test_combine_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let outcome = run_combine(&missing, &missing, &dir.path().join("out.json")).unwrap();
        assert!(matches!(outcome, CombineOutcome::InputMissing(_)));
    }
}

//! Both pipelines run back to back against one dataset file.

use histdata_core::config::{ExtractConfig, MergeConfig};
use histdata_core::{store, MonthlyRecord};
use histdata_ingestion::{run_extraction, ExtractOutcome};
use histdata_merge::{run_merge, MergeOutcome};
use std::fs;
use std::process::Command;

const HTML_EXPORT: &str = r#"<table><tbody>
<tr><td>15 mai 2003</td><td>x</td><td>x</td><td>3,10</td><td>3,20</td></tr>
<tr><td>02 mai 2003</td><td>x</td><td>x</td><td>2,90</td><td>3,00</td></tr>
<tr><td>14 mai 2003</td><td>0,01 Dividende</td></tr>
<tr><td>17 déc. 2007</td><td>x</td><td>x</td><td>70,00</td><td>71,50</td></tr>
<tr><td>03 déc. 2007</td><td>x</td><td>x</td><td>68,25</td><td>69,00</td></tr>
</tbody></table>"#;

const SECONDARY_EXPORT: &str = "\
date        low    close
2003-05-15  10.0   10.5
2003-07-01  4.004  4.126
2007-01-10  50.0   51.0
";

#[test]
fn extract_then_merge() {
    let dir = tempfile::tempdir().unwrap();
    let html = dir.path().join("raw").join("history.html");
    let csv = dir.path().join("raw").join("deducted.csv");
    let json = dir.path().join("data").join("history.json");
    fs::create_dir_all(html.parent().unwrap()).unwrap();
    fs::write(&html, HTML_EXPORT).unwrap();
    fs::write(&csv, SECONDARY_EXPORT).unwrap();

    let extract = ExtractConfig {
        input: html,
        output: json.clone(),
    };
    assert!(matches!(
        run_extraction(&extract).unwrap(),
        ExtractOutcome::Completed(_)
    ));
    assert_eq!(
        store::load_dataset(&json).unwrap().into_records(),
        vec![
            MonthlyRecord::new("2003-05", 2.9, 3.2),
            MonthlyRecord::new("2007-12", 68.25, 71.5),
        ]
    );

    let merge = MergeConfig {
        source: csv,
        target: json.clone(),
        ..MergeConfig::default()
    };
    assert!(matches!(
        run_merge(&merge).unwrap(),
        MergeOutcome::Completed(_)
    ));
    assert_eq!(
        store::load_dataset(&json).unwrap().into_records(),
        vec![
            MonthlyRecord::new("2003-05", 10.0, 10.5),
            MonthlyRecord::new("2003-07", 4.0, 4.13),
            MonthlyRecord::new("2007-12", 68.25, 71.5),
        ]
    );
}

#[test]
fn missing_input_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("history.json");

    let result = Command::new(env!("CARGO_BIN_EXE_extract-history"))
        .arg(dir.path().join("absent.html"))
        .arg(&output)
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("not found"));
    assert!(!output.exists());
}

#[test]
fn single_path_argument_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data").join("qld-history.json");

    let result = Command::new(env!("CARGO_BIN_EXE_extract-history"))
        .current_dir(dir.path())
        .arg(dir.path().join("history.html"))
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn merge_rejects_inverted_window() {
    let dir = tempfile::tempdir().unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_merge-history"))
        .arg(dir.path().join("absent.csv"))
        .arg(dir.path().join("absent.json"))
        .args(["--start", "2006-01-01", "--end", "2000-01-01"])
        .output()
        .unwrap();

    assert!(!result.status.success());
}

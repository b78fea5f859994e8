use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_generate_fees_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fees.csv");
    common::generate_fees_csv(&path, 5).expect("Failed to generate CSV");

    let content = std::fs::read_to_string(&path).expect("Failed to read file");
    // Header + 5 rows = 6 lines
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn test_bulk_import_then_query() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fees.csv");
    common::generate_fees_csv(&path, 2_000).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("tuition-ledger"))
        .arg("--fees")
        .arg(&path)
        .args(["fees", "1999"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["student_id"], "S-001999");
    assert_eq!(value["summary"]["remaining_balance"], 10000.0);
}

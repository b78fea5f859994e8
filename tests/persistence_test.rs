#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn run(db_path: &Path, args: &[&str]) -> serde_json::Value {
    let output = Command::new(cargo_bin!("tuition-ledger"))
        .arg("--db-path")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute command");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_rocksdb_payment_across_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("ledger_db");

    // 1. Load assessments
    let imported = run(&db_path, &["import", "tests/fixtures/fees.csv"]);
    assert_eq!(imported["imported"], 3);

    // 2. Initiate a payment
    let initiated = run(&db_path, &["pay", "1", "--amount", "20000", "--method", "Card"]);
    let transaction_id = initiated["transaction_id"].as_str().unwrap().to_string();

    // 3. Gateway confirms it in a later run
    let confirmed = run(
        &db_path,
        &["confirm", &transaction_id, "--status", "COMPLETED", "--reference", "GW-1"],
    );
    assert_eq!(confirmed["status"], "COMPLETED");
    assert_eq!(confirmed["updated_balance"], 30000.0);

    // 4. Balance and details survive restarts
    let fees = run(&db_path, &["fees", "1"]);
    assert_eq!(fees["summary"]["payment_status"], "Partial");
    assert_eq!(fees["summary"]["total_amount_paid"], 20000.0);

    let details = run(&db_path, &["transaction", &transaction_id]);
    assert_eq!(details["reference_number"], "GW-1");
    assert_eq!(details["student_id"], "2024-00001");
}

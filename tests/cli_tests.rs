// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Datelike;
use std::path::Path;
use std::process::{Command, Output};

fn kakeibo(db: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_kakeibo"))
        .env("KAKEIBO_DB", db)
        .env_remove("KAKEIBO_LOG")
        .args(args)
        .output()
        .expect("run kakeibo");
    assert!(
        output.status.success(),
        "kakeibo {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

#[test]
fn startup_materialization_keeps_json_output_parseable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db = tmp.path().join("kakeibo.sqlite");
    kakeibo(
        &db,
        &[
            "fixed", "add", "--id", "rent", "--name", "Rent", "--amount", "50000", "--category",
            "Housing", "--day", "1",
        ],
    );
    let today = chrono::Local::now().date_naive();
    let generated = format!("fixed-rent-{}-{:02}", today.year(), today.month());
    kakeibo(&db, &["tx", "rm", "--id", &generated]);

    // The next start records the removed occurrence again before listing.
    let output = kakeibo(&db, &["tx", "list", "--json"]);
    let rows: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("tx list output json");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], generated.as_str());
}

#[test]
fn explicit_run_reports_generated_items() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db = tmp.path().join("kakeibo.sqlite");
    let output = kakeibo(
        &db,
        &[
            "fixed", "add", "--id", "rent", "--name", "Rent", "--amount", "50000", "--category",
            "Housing", "--day", "1",
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Recorded fixed expense 'Rent'"));

    let output = kakeibo(&db, &["fixed", "list", "--json"]);
    let rules: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("fixed list output json");
    assert_eq!(rules[0]["dayOfMonth"], 1);
}

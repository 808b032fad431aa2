//! Integration tests for the `freebusy` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the normalize,
//! status and free subcommands through the actual binary, including
//! stdin/stdout piping, file I/O and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn query_json() -> String {
    std::fs::read_to_string(fixture("query.json")).expect("query.json fixture must exist")
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("freebusy")
        .unwrap()
        .args(args)
        .output()
        .expect("binary must run");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// normalize
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn normalize_file_to_stdout() {
    let value = run_json(&["normalize", "-i", fixture("query.json").as_str()]);

    assert_eq!(value["participant"], "alice@example.com");
    assert_eq!(value["from"], "2026-03-16T08:00:00Z");
    assert_eq!(value["until"], "2026-03-16T18:00:00Z");

    let intervals = value["intervals"].as_array().unwrap();
    let summary: Vec<(String, String, String)> = intervals
        .iter()
        .map(|i| {
            (
                i["start"].as_str().unwrap()[11..16].to_string(),
                i["end"].as_str().unwrap()[11..16].to_string(),
                i["status"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    let expected = [
        ("08:00", "08:30", "TENTATIVE"),
        ("09:00", "09:30", "BUSY"),
        ("09:30", "09:45", "OUT_OF_OFFICE"),
        ("09:45", "10:00", "BUSY"),
        ("17:30", "18:00", "BUSY"),
    ];
    let expected: Vec<(String, String, String)> = expected
        .iter()
        .map(|(s, e, st)| (s.to_string(), e.to_string(), st.to_string()))
        .collect();
    assert_eq!(summary, expected);

    assert_eq!(intervals[0]["origin"], "early-hold");
    assert_eq!(intervals[2]["origin"], "dentist");
}

#[test]
fn normalize_stdin_to_stdout() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .arg("normalize")
        .write_stdin(query_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("OUT_OF_OFFICE"))
        .stdout(predicate::str::contains("alice@example.com"));
}

#[test]
fn normalize_file_to_file() {
    let output_path = std::env::temp_dir().join("freebusy-test-normalize-output.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["normalize", "-i", fixture("query.json").as_str(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["intervals"].as_array().unwrap().len(), 5);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn normalize_skips_invalid_records_with_warning() {
    let output = Command::cargo_bin("freebusy")
        .unwrap()
        .args(["normalize", "-i", fixture("invalid_records.json").as_str()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("skipped 2 invalid interval record(s)"),
        "stderr was: {}",
        stderr
    );
    assert!(
        !stderr.contains('\u{1b}'),
        "captured stderr should carry no ANSI escapes: {:?}",
        stderr
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let intervals = value["intervals"].as_array().unwrap();
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0]["origin"], "ok");
}

#[test]
fn rust_log_debug_enables_engine_events() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .env("RUST_LOG", "debug")
        .args(["normalize", "-i", fixture("query.json").as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("normalized free/busy intervals"))
        .stderr(predicate::str::contains("ingested free/busy records"));
}

#[test]
fn default_log_level_hides_debug_events() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .env_remove("RUST_LOG")
        .args(["normalize", "-i", fixture("query.json").as_str()])
        .assert()
        .success()
        .stderr(predicate::str::contains("normalized free/busy intervals").not());
}

#[test]
fn inverted_window_fails() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["normalize", "-i", fixture("inverted_window.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid query window"));
}

#[test]
fn malformed_document_fails() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .arg("normalize")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse query document"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["normalize", "-i", "/nonexistent/query.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// status
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn status_inside_out_of_office() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["status", "-i", fixture("query.json").as_str(), "--at", "2026-03-16T09:35:00Z"])
        .assert()
        .success()
        .stdout("OUT_OF_OFFICE\n");
}

#[test]
fn status_accepts_naive_instant() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["status", "-i", fixture("query.json").as_str(), "--at", "2026-03-16T09:50:00"])
        .assert()
        .success()
        .stdout("BUSY\n");
}

#[test]
fn status_in_gap_is_free() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["status", "--at", "2026-03-16T12:00:00Z"])
        .write_stdin(query_json())
        .assert()
        .success()
        .stdout("FREE\n");
}

#[test]
fn status_rejects_bad_instant() {
    Command::cargo_bin("freebusy")
        .unwrap()
        .args(["status", "-i", fixture("query.json").as_str(), "--at", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid instant"));
}

// ─────────────────────────────────────────────────────────────────────────────
// free
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_lists_gaps_between_blocking_intervals() {
    let value = run_json(&["free", "-i", fixture("query.json").as_str()]);

    let slots = value.as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["start"], "2026-03-16T08:30:00Z");
    assert_eq!(slots[0]["duration_minutes"], 30);
    assert_eq!(slots[1]["start"], "2026-03-16T10:00:00Z");
    assert_eq!(slots[1]["end"], "2026-03-16T17:30:00Z");
    assert_eq!(slots[1]["duration_minutes"], 450);
}

#[test]
fn free_with_min_minutes_returns_first_fit() {
    let value = run_json(&["free", "-i", fixture("query.json").as_str(), "--min-minutes", "45"]);

    assert_eq!(value["start"], "2026-03-16T10:00:00Z");
    assert_eq!(value["duration_minutes"], 450);
}

#[test]
fn free_with_impossible_minimum_prints_null() {
    let value = run_json(&["free", "-i", fixture("query.json").as_str(), "--min-minutes", "1000"]);

    assert!(value.is_null());
}

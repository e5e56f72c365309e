//! End-to-end tests for the `flatrent` binary.
//!
//! Each test writes an input file into a temporary directory, runs the binary
//! against it and inspects the exit status and the report file.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run `flatrent <input> -o <report>` inside `dir`
fn run_flatrent(dir: &Path, input: &Path, report: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flatrent"))
        .current_dir(dir)
        .env_remove("FLATRENT_CONFIG")
        .env_remove("RUST_LOG")
        .arg(input)
        .arg("-o")
        .arg(report)
        .output()
        .expect("Failed to run flatrent")
}

fn results_section(report: &str) -> &str {
    report
        .split_once("Results\n")
        .map(|(_, rest)| rest)
        .expect("report has no Results section")
}

#[test]
fn test_malformed_input_writes_no_report() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data.txt");
    let report = temp_dir.path().join("results.txt");
    fs::write(&input, "Oak;1;250\nbad\n").unwrap();

    let output = run_flatrent(temp_dir.path(), &input, &report);

    assert!(!output.status.success());
    assert!(!report.exists(), "report must not be written when loading fails");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_results_sorted_by_street_then_number() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data.txt");
    let report = temp_dir.path().join("results.txt");
    fs::write(&input, "Oak;1;250\nElm;2;250\nOak;2;250\n").unwrap();

    let output = run_flatrent(temp_dir.path(), &input, &report);
    assert!(output.status.success(), "flatrent failed: {}", String::from_utf8_lossy(&output.stderr));

    let text = fs::read_to_string(&report).unwrap();
    let results = results_section(&text);
    let rows: Vec<&str> = results.lines().filter(|l| l.contains("30000.00")).collect();

    assert_eq!(
        rows,
        vec![
            format!("|  1|{:>22}|{:>8}|250.00|30000.00|", "Elm", 2),
            format!("|  2|{:>22}|{:>8}|250.00|30000.00|", "Oak", 1),
            format!("|  3|{:>22}|{:>8}|250.00|30000.00|", "Oak", 2),
        ]
    );
    assert!(!results.contains("No Results Found!"));
}

#[test]
fn test_empty_input_reports_no_results() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("data.txt");
    let report = temp_dir.path().join("results.txt");
    fs::write(&input, "").unwrap();

    let output = run_flatrent(temp_dir.path(), &input, &report);
    assert!(output.status.success(), "flatrent failed: {}", String::from_utf8_lossy(&output.stderr));

    let text = fs::read_to_string(&report).unwrap();
    assert!(results_section(&text).contains("|No Results Found!|"));
}

//! End-to-end tests of the `knotfold` binary.

use std::fs;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

fn knotfold() -> Command {
    Command::cargo_bin("knotfold").unwrap()
}

fn fasta_file(records: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".fa").unwrap();
    for (id, sequence) in records {
        writeln!(file, ">{id} test record").unwrap();
        writeln!(file, "{sequence}").unwrap();
    }
    file.flush().unwrap();
    file
}

const HAIRPIN: &str = "GGGGAAAACCCCAAAATTTTGGGGAAAACCCCAAAATTTT";

#[test]
fn test_help_lists_subcommands() {
    knotfold()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fold"))
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_fold_text() {
    knotfold()
        .args(["fold", "ggggcccc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(((())))"))
        .stdout(predicate::str::contains("Base pairs: 4"));
}

#[test]
fn test_fold_json_with_matrix() {
    let output = knotfold()
        .args(["fold", "GGGGCCCC", "--matrix", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["structure"], "(((())))");
    assert_eq!(json["base_pairs"], 4);
    assert_eq!(json["matrix"][0][7], 4);
    assert_eq!(json["pairs"][0], serde_json::json!([0, 7]));
}

#[test]
fn test_predict_tsv() {
    let input = fasta_file(&[("hairpin", HAIRPIN), ("tiny", "GC")]);
    knotfold()
        .args(["predict", "--format", "tsv"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("id\tlength"))
        .stdout(predicate::str::contains("hairpin\t40"))
        .stdout(predicate::str::contains("tiny").not());
}

#[test]
fn test_predict_min_length_override() {
    let input = fasta_file(&[("tiny", "GGGAAACCC")]);
    knotfold()
        .args(["predict", "--min-length", "5"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(((...)))"));
}

#[test]
fn test_predict_without_valid_sequences_fails() {
    let input = fasta_file(&[("tiny", "GC")]);
    knotfold()
        .arg("predict")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid sequences"));
}

#[test]
fn test_missing_input_fails() {
    knotfold()
        .args(["predict", "/nonexistent/input.fa"])
        .assert()
        .failure();
}

#[test]
fn test_scan_json() {
    let input = fasta_file(&[("hairpin", HAIRPIN)]);
    let output = knotfold()
        .args(["scan", "--window-size", "20", "--stride", "10", "--format", "json"])
        .arg(input.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    // Starts 0 and 10 fit strictly inside 40 bases; 20 would end at 40
    assert_eq!(json["summary"]["total_windows_analyzed"], 2);
    let distribution = &json["summary"]["risk_distribution"];
    let total: u64 = ["LOW", "MEDIUM", "HIGH", "CRITICAL"]
        .iter()
        .map(|tier| distribution[tier].as_u64().unwrap())
        .sum();
    assert_eq!(total, 2);
}

#[test]
fn test_scan_writes_reports() {
    let input = fasta_file(&[("hairpin", HAIRPIN)]);
    let dir = TempDir::new().unwrap();

    knotfold()
        .args(["scan", "--window-size", "20", "--stride", "10", "--output-dir"])
        .arg(dir.path())
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Windows analyzed: 2"));

    let results: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("results.json")).unwrap())
            .unwrap();
    assert_eq!(results["sequences"][0]["id"], "hairpin");
    assert_eq!(results["sequences"][0]["length"], 40);

    let details: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("knot_details.json")).unwrap())
            .unwrap();
    assert_eq!(details.as_array().unwrap().len(), 2);
    assert_eq!(details[1]["window_start"], 10);
    assert_eq!(details[1]["sequence_id"], "hairpin");
}

#[test]
fn test_scan_sequence_shorter_than_window_fails() {
    let input = fasta_file(&[("hairpin", HAIRPIN)]);
    knotfold()
        .args(["scan", "--window-size", "40"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No knot records"));
}

#[test]
fn test_scan_rejects_zero_stride() {
    let input = fasta_file(&[("hairpin", HAIRPIN)]);
    knotfold()
        .args(["scan", "--stride", "0"])
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stride must be positive"));
}

#[test]
fn test_scan_with_config_file() {
    let input = fasta_file(&[("hairpin", HAIRPIN)]);
    let mut config = NamedTempFile::with_suffix(".json").unwrap();
    config
        .write_all(br#"{"window_size": 10, "stride": 10}"#)
        .unwrap();
    config.flush().unwrap();

    knotfold()
        .args(["scan", "--format", "tsv", "--config"])
        .arg(config.path())
        .arg(input.path())
        .assert()
        .success()
        // Starts 0, 10, 20
        .stdout(predicate::str::contains("hairpin\t20\t30"))
        .stdout(predicate::str::contains("hairpin\t30\t40").not());
}

#[test]
fn test_scan_with_stride_larger_than_any_sequence() {
    let input = fasta_file(&[("hairpin", HAIRPIN)]);
    let stride = usize::MAX.to_string();
    knotfold()
        .args(["scan", "--format", "tsv", "--stride", stride.as_str()])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("hairpin\t0\t30"));
}

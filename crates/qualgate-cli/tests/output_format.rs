//! Output format validation tests.
//!
//! Tests JSON/JSONL output format correctness and required field presence.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use qualgate_test_support::SyntheticImageBuilder;
use serde_json::Value;
use tempfile::TempDir;

fn qualgate(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qualgate").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("QUALGATE_ALLOWED_EXTENSIONS")
        .arg("-q");
    cmd
}

fn good_png(dir: &Path) -> PathBuf {
    let path = dir.join("good.png");
    SyntheticImageBuilder::good_photo(640, 640)
        .rgb()
        .save(&path)
        .unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    String::from_utf8(cmd.output().unwrap().stdout).unwrap()
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_one_object_per_image() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(qualgate(home.path()).arg(&image).arg(&image));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "Should have one line per image");

    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert!(value.is_object(), "JSONL line should be an object");
    }
}

#[test]
fn test_record_has_exactly_summary_fields() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(qualgate(home.path()).arg(&image));
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    let object = value.as_object().unwrap();

    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "image_path",
            "quality_score",
            "resolution_passed",
            "tests_passed",
            "timestamp",
            "total_tests"
        ]
    );

    assert!(value["image_path"].as_str().unwrap().ends_with("good.png"));
    assert_eq!(value["total_tests"], 5);
    assert_eq!(value["tests_passed"], 5);
    assert_eq!(value["quality_score"], 1.0);
    assert_eq!(value["resolution_passed"], true);
}

#[test]
fn test_timestamp_is_rfc3339_utc() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(qualgate(home.path()).arg(&image));
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    let timestamp = value["timestamp"].as_str().unwrap();

    assert!(timestamp.contains('T'), "timestamp: {timestamp}");
    assert!(timestamp.ends_with('Z'), "timestamp: {timestamp}");
}

// === JSON Array Format Tests ===

#[test]
fn test_json_format_is_array() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(
        qualgate(home.path())
            .args(["--format", "json"])
            .arg(&image)
            .arg(&image),
    );
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_format_empty_array_for_no_images() {
    let home = TempDir::new().unwrap();
    let empty = home.path().join("empty");
    std::fs::create_dir(&empty).unwrap();

    let stdout = stdout_of(qualgate(home.path()).args(["--format", "json"]).arg(&empty));
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_pretty_format_is_indented() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(
        qualgate(home.path())
            .args(["--format", "json", "--pretty"])
            .arg(&image),
    );
    assert!(stdout.lines().count() > 3);
    assert!(stdout.contains("  \"quality_score\""));
}

#[test]
fn test_non_pretty_format_is_compact() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(qualgate(home.path()).args(["--format", "json"]).arg(&image));
    assert_eq!(stdout.trim().lines().count(), 1);
}

// === Details Tests ===

#[test]
fn test_details_adds_per_check_measurements() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(qualgate(home.path()).arg("--details").arg(&image));
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    let checks = value["checks"].as_array().unwrap();

    let names: Vec<_> = checks
        .iter()
        .map(|c| c["check"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["resolution", "blur", "brightness", "saturation", "noise", "exposure"]
    );
    assert!(checks.iter().all(|c| c["passed"] == true));

    assert_eq!(checks[0]["measurement"]["width"], 640);
    assert!(checks[1]["measurement"]["value"].as_f64().unwrap() > 50.0);
    let exposure = &checks[5]["measurement"];
    assert!(
        exposure["upper"].as_f64().unwrap() - exposure["lower"].as_f64().unwrap() > 50.0
    );
}

#[test]
fn test_no_details_by_default() {
    let home = TempDir::new().unwrap();
    let image = good_png(home.path());

    let stdout = stdout_of(qualgate(home.path()).arg(&image));
    assert!(!stdout.contains("\"checks\""));
}

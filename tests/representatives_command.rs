// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

fn run_reps_json(dir: &Path, extra: &[&str]) -> Value {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cloneclass"));
    let assert = cmd
        .current_dir(dir)
        .args([
            "--format",
            "json",
            "--compact",
            "representatives",
            "pairs.csv",
            "--index",
            "fragments.json",
        ])
        .args(extra)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("json payload")
}

#[test]
fn shortest_indexed_fragment_represents_the_class() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        &dir.path().join("pairs.csv"),
        "A.java,1,12,B.java,1,8\n\
         B.java,1,8,C.java,1,10\n",
    );
    let index = json!([
        { "path": "A.java", "start_line": 1, "end_line": 12, "text": "x".repeat(120) },
        { "path": "B.java", "start_line": 1, "end_line": 8, "text": "x".repeat(45) },
        { "path": "C.java", "start_line": 1, "end_line": 10, "text": "x".repeat(80) },
    ]);
    write_file(&dir.path().join("fragments.json"), &index.to_string());

    let payload = run_reps_json(dir.path(), &[]);
    assert_eq!(payload["class_count"], 1);
    assert_eq!(payload["unrepresented"], 0);

    let rep = &payload["representatives"][0]["representative"];
    assert_eq!(rep["path"], "B.java");
    assert_eq!(rep["text"].as_str().expect("text").len(), 45);
}

#[test]
fn classes_with_no_indexed_fragment_report_null() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        &dir.path().join("pairs.csv"),
        "A.java,1,10,B.java,1,10\n\
         X.java,1,5,Y.java,1,5\n",
    );
    let index = json!([
        { "path": "A.java", "start_line": 1, "end_line": 10, "text": "short" },
    ]);
    write_file(&dir.path().join("fragments.json"), &index.to_string());

    let payload = run_reps_json(dir.path(), &[]);
    assert_eq!(payload["class_count"], 2);
    assert_eq!(payload["unrepresented"], 1);

    let reps = payload["representatives"].as_array().expect("entries");
    let nulls = reps
        .iter()
        .filter(|entry| entry["representative"].is_null())
        .count();
    assert_eq!(nulls, 1);
}

#[test]
fn index_lookup_tolerates_absolute_relation_paths() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        &dir.path().join("pairs.csv"),
        "/dataset/src/A.java,1,10,/dataset/src/B.java,1,10\n",
    );
    // extractor emitted dataset-relative paths
    let index = json!([
        { "path": "src/A.java", "start_line": 1, "end_line": 10, "text": "aaa" },
        { "path": "src/B.java", "start_line": 1, "end_line": 10, "text": "bb" },
    ]);
    write_file(&dir.path().join("fragments.json"), &index.to_string());

    let payload = run_reps_json(dir.path(), &[]);
    assert_eq!(payload["unrepresented"], 0);
    assert_eq!(
        payload["representatives"][0]["representative"]["path"],
        "src/B.java"
    );
}

#[test]
fn filters_apply_before_representative_selection() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        &dir.path().join("pairs.csv"),
        "A.java,1,1,B.java,1,1\n\
         C.java,1,10,D.java,1,10\n",
    );
    let index = json!([
        { "path": "C.java", "start_line": 1, "end_line": 10, "text": "ccc" },
        { "path": "D.java", "start_line": 1, "end_line": 10, "text": "dd" },
    ]);
    write_file(&dir.path().join("fragments.json"), &index.to_string());

    let payload = run_reps_json(dir.path(), &["--min-span", "3"]);
    assert_eq!(payload["class_count"], 1);
    assert_eq!(
        payload["representatives"][0]["representative"]["path"],
        "D.java"
    );
}

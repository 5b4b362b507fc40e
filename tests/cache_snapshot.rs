// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

fn run_cache_json(dir: &Path, args: &[&str]) -> Value {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cloneclass"));
    let assert = cmd
        .current_dir(dir)
        .args(["--format", "json", "--compact", "cache"])
        .args(args)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("json payload")
}

#[test]
fn build_scans_then_restores_from_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("dataset/a.java"), "alpha\n");
    write_file(&dir.path().join("dataset/sub/b.java"), "beta\n");

    let first = run_cache_json(
        dir.path(),
        &["build", "dataset", "--cache-dir", "snapshots"],
    );
    assert_eq!(first["files"], 2);
    assert_eq!(first["restored"], false);
    let snapshot = first["snapshot"].as_str().expect("snapshot path");
    assert!(dir.path().join(snapshot).exists() || Path::new(snapshot).exists());

    let second = run_cache_json(
        dir.path(),
        &["build", "dataset", "--cache-dir", "snapshots"],
    );
    assert_eq!(second["files"], 2);
    assert_eq!(second["restored"], true);
}

#[test]
fn force_rescans_even_with_a_fresh_snapshot() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("dataset/a.java"), "alpha\n");

    run_cache_json(dir.path(), &["build", "dataset", "--cache-dir", "snapshots"]);
    let forced = run_cache_json(
        dir.path(),
        &["build", "dataset", "--cache-dir", "snapshots", "--force"],
    );
    assert_eq!(forced["restored"], false);
}

#[test]
fn unreadable_files_are_counted_not_fatal() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("dataset/ok.java"), "fine\n");
    fs::write(dir.path().join("dataset/bad.bin"), [0xff, 0xfe, 0x00]).expect("write binary");

    let payload = run_cache_json(
        dir.path(),
        &["build", "dataset", "--cache-dir", "snapshots"],
    );
    assert_eq!(payload["files"], 1);
    assert_eq!(payload["skipped"], 1);
}

#[test]
fn status_reports_freshness() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("dataset/a.java"), "alpha\n");

    let missing = run_cache_json(
        dir.path(),
        &["status", "dataset", "--cache-dir", "snapshots"],
    );
    assert_eq!(missing["fresh"], false);

    run_cache_json(dir.path(), &["build", "dataset", "--cache-dir", "snapshots"]);

    let fresh = run_cache_json(
        dir.path(),
        &["status", "dataset", "--cache-dir", "snapshots"],
    );
    assert_eq!(fresh["fresh"], true);
    assert!(fresh["fingerprint"].as_str().expect("fingerprint").len() > 16);
}

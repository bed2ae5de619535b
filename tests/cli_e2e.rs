//! End-to-end CLI tests for the linkstash binary.

// `Command::cargo_bin` is deprecated in assert_cmd >=2.0.17 in favor of
// `cargo::cargo_bin_cmd!` macro. Suppressed until migration to the new API.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn linkstash(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("linkstash").unwrap();
    cmd.env_remove("RUST_LOG").arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn test_binary_help_flag() {
    let mut cmd = Command::cargo_bin("linkstash").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("collect"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_binary_without_subcommand_fails() {
    let mut cmd = Command::cargo_bin("linkstash").unwrap();
    cmd.assert().failure();
}

#[test]
fn test_collect_without_urls_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    linkstash(temp_dir.path())
        .arg("collect")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No URLs supplied"));
}

#[test]
fn test_collect_missing_markdown_reports_and_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    linkstash(temp_dir.path())
        .args(["collect", "--markdown"])
        .arg(temp_dir.path().join("absent.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_collect_twice_reports_new_then_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let urls = ["collect", "--urls", "https://a.example/1", "https://b.example/2"];

    linkstash(temp_dir.path())
        .args(urls)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 new URL(s), 0 duplicate(s) skipped"));

    linkstash(temp_dir.path())
        .args(urls)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 new URL(s), 2 duplicate(s) skipped"));

    assert!(temp_dir.path().join("url-hashes.json").exists());
}

#[test]
fn test_collect_from_markdown_uses_path_as_source() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("notes.md");
    std::fs::write(&notes, "read https://a.example/post. later").unwrap();
    let data = temp_dir.path().join("data");

    linkstash(&data)
        .args(["collect", "--markdown"])
        .arg(&notes)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 new URL(s)"));

    let urls_dir = data.join("urls");
    let partition = std::fs::read_dir(&urls_dir).unwrap().next().unwrap().unwrap().path();
    let entries: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(partition).unwrap()).unwrap();
    assert_eq!(entries[0]["url"], "https://a.example/post");
    assert_eq!(entries[0]["source"], notes.display().to_string());
    assert_eq!(entries[0]["status"], "pending");
}

#[test]
fn test_data_dir_env_selects_storage_root() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("linkstash").unwrap();
    cmd.env("DATA_DIR", temp_dir.path())
        .args(["collect", "--urls", "https://env.example"])
        .assert()
        .success();
    assert!(temp_dir.path().join("url-hashes.json").exists());
}

#[test]
fn test_status_no_results_message() {
    let temp_dir = TempDir::new().unwrap();
    linkstash(temp_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries with status=pending found."));
}

#[test]
fn test_status_json_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    linkstash(temp_dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_status_json_lists_collected_entries() {
    let temp_dir = TempDir::new().unwrap();
    linkstash(temp_dir.path())
        .args(["collect", "--urls", "https://a.example"])
        .assert()
        .success();

    let output = linkstash(temp_dir.path())
        .args(["status", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["url"], "https://a.example");
    assert_eq!(records[0]["hash"], linkstash::url_fingerprint("https://a.example"));
    assert_eq!(records[0]["raw_doc_exists"], false);
}

#[test]
fn test_fetch_missing_partition_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    linkstash(temp_dir.path())
        .args(["fetch", "--date", "2000-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No URL partition for 2000-01-01"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_partial_failure_still_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Ok</title></head><body><article><p>fine</p></article></body></html>",
            "text/html",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().to_path_buf();
    let ok = format!("{}/ok", server.uri());
    let bad = format!("{}/bad", server.uri());

    let assert = tokio::task::spawn_blocking(move || {
        linkstash(&data)
            .args(["collect", "--urls", ok.as_str(), bad.as_str()])
            .assert()
            .success();
        linkstash(&data).arg("fetch").assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Done: 1 fetched, 1 failed, 0 skipped"));

    linkstash(temp_dir.path())
        .args(["status", "--status", "failed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/bad"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quiet_fetch_still_logs_entry_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let data = temp_dir.path().to_path_buf();
    let bad = format!("{}/down", server.uri());

    let assert = tokio::task::spawn_blocking(move || {
        linkstash(&data)
            .args(["collect", "--urls", bad.as_str()])
            .assert()
            .success();
        linkstash(&data).args(["-q", "fetch"]).assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Done: 0 fetched, 1 failed, 0 skipped"))
        .stderr(predicate::str::contains("fetch failed"))
        .stderr(predicate::str::contains("/down"));
}

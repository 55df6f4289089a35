//! Integration tests for the `callmap` binary entry point.
//!
//! Exercises the rendering commands end to end and the user-facing error
//! handling for missing inputs and bad usage.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, starts_with};
use tempfile::TempDir;

const TREE: &str = r#"{
  "name": "place()",
  "detail": "com.acme.OrderService",
  "location": { "file": "/ws/src/OrderService.java", "startLine": 13, "endLine": 15 },
  "source": "@Transactional\nvoid place() {\n    repository.save();\n}",
  "classAnnotations": "@Service\npublic class OrderService {",
  "outgoingCalls": [
    {
      "name": "size()",
      "detail": "java.util.List",
      "location": { "file": "/jdk/java/util/List.java", "startLine": 40, "endLine": 42 },
      "external": true,
      "callSites": [{ "startLine": 14, "endLine": 14 }]
    }
  ]
}"#;

fn write_tree(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("tree.json");
    fs::write(&path, TREE).expect("write tree");
    path
}

#[test]
fn prompt_prints_sequence_instructions_by_default() {
    let dir = TempDir::new().expect("temp dir");
    let tree = write_tree(&dir);

    let mut command = cargo_bin_cmd!("callmap");
    command.env("CALLMAP_LOG_FILTER", "off");
    command.arg("prompt").arg("--tree").arg(&tree);
    command
        .assert()
        .success()
        .stdout(contains("ID: OS_place"))
        .stdout(contains("Method Annotations:\n@Transactional"))
        .stdout(contains("size()").not());
}

#[test]
fn config_flags_precede_the_command() {
    let dir = TempDir::new().expect("temp dir");
    let tree = write_tree(&dir);

    let mut command = cargo_bin_cmd!("callmap");
    command
        .args(["--log-filter", "off", "--diagram-kind", "bare"])
        .arg("prompt")
        .arg("--tree")
        .arg(&tree);
    command
        .assert()
        .success()
        .stdout(starts_with("################################\nID: OS_place"));
}

#[test]
fn records_skip_external_nodes() {
    let dir = TempDir::new().expect("temp dir");
    let tree = write_tree(&dir);

    let mut command = cargo_bin_cmd!("callmap");
    command.env("CALLMAP_LOG_FILTER", "off");
    command.arg("records").arg("--tree").arg(&tree);
    command
        .assert()
        .success()
        .stdout(contains("\"methodNameSignature\": \"place()\""))
        .stdout(contains("java.util.List").not());
}

#[test]
fn missing_tree_exits_with_failure() {
    let dir = TempDir::new().expect("temp dir");

    let mut command = cargo_bin_cmd!("callmap");
    command.env("CALLMAP_LOG_FILTER", "off");
    command
        .arg("records")
        .arg("--tree")
        .arg(dir.path().join("absent.json"));
    command
        .assert()
        .failure()
        .stderr(contains("failed to read"));
}

#[test]
fn missing_command_exits_with_failure() {
    let mut command = cargo_bin_cmd!("callmap");
    command
        .assert()
        .failure()
        .stderr(contains("Usage"));
}

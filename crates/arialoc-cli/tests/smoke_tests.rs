//! Smoke tests for the arialoc CLI
//!
//! These tests run the built binary against snapshot files on disk.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command for the arialoc binary
fn arialoc() -> Command {
    let mut cmd = Command::cargo_bin("arialoc").expect("arialoc binary should exist");
    cmd.env_remove("RUST_LOG").env_remove("ARIALOC_CONFIG");
    cmd
}

const SHOP: &str = r#"{
    "role": "document",
    "children": [
        { "role": "navigation", "children": [
            { "role": "list", "id": "menu", "children": [
                { "role": "listitem", "id": "home", "name": "Home" },
                { "role": "listitem", "id": "products", "name": "Products", "children": [
                    { "role": "list", "id": "submenu", "children": [
                        { "role": "listitem", "id": "shoes", "name": "Shoes" }
                    ]}
                ]}
            ]}
        ]},
        { "role": "main", "children": [
            { "role": "button", "id": "buy", "name": "Buy now" },
            { "role": "dialog", "hidden": true, "children": [
                { "role": "button", "id": "confirm", "name": "Confirm purchase" }
            ]}
        ]}
    ]
}"#;

fn shop_tree(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("shop.json");
    fs::write(&path, SHOP).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    arialoc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    arialoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_no_args_shows_help() {
    arialoc().assert().failure();
}

// ============================================================================
// Find
// ============================================================================

#[test]
fn test_find_outer_listitems() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{list} outer {listitem}", "--tree"])
        .arg(shop_tree(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("listitem#home"))
        .stdout(predicate::str::contains("listitem#products"))
        .stdout(predicate::str::contains("listitem#shoes").not());
}

#[test]
fn test_find_descendants_include_nested() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{list} {listitem}", "--tree"])
        .arg(shop_tree(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("listitem#shoes"));
}

#[test]
fn test_find_json_output() {
    let dir = TempDir::new().unwrap();
    let output = arialoc()
        .args(["find", "{button 'Buy*'}", "--format", "json", "--tree"])
        .arg(shop_tree(&dir))
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["matches"][0]["id"], "buy");
}

#[test]
fn test_find_one_not_found_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{dialog} {button}", "--one", "--tree"])
        .arg(shop_tree(&dir))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Didn't find any elements"))
        .stderr(predicate::str::contains("hidden from the accessibility tree"));
}

#[test]
fn test_find_one_include_hidden() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{dialog} {button}", "--one", "--include-hidden", "--tree"])
        .arg(shop_tree(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("button#confirm"));
}

#[test]
fn test_find_without_matches_succeeds() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{slider}", "--tree"])
        .arg(shop_tree(&dir))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_find_strict_ambiguous() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{listitem}", "--one", "--strict", "--tree"])
        .arg(shop_tree(&dir))
        .assert()
        .failure()
        .stderr(predicate::str::contains("matched 3 elements"));
}

#[test]
fn test_find_missing_tree_file() {
    let dir = TempDir::new().unwrap();
    arialoc()
        .args(["find", "{list}", "--tree"])
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_config_file_sets_format() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("arialoc.yaml");
    fs::write(&config, "format: json\n").unwrap();
    let output = arialoc()
        .arg("--config")
        .arg(&config)
        .args(["find", "{navigation}", "--tree"])
        .arg(shop_tree(&dir))
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 1);
}

// ============================================================================
// Parse and Check
// ============================================================================

#[test]
fn test_parse_canonical_form() {
    arialoc()
        .args(["parse", "{list}  outer {listitem   'Home'}"])
        .assert()
        .success()
        .stdout("{list} outer {listitem 'Home'}\n");
}

#[test]
fn test_parse_rejects_two_outers() {
    arialoc()
        .args(["parse", "{list} outer {list} outer {listitem}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid semantic locator"));
}

#[test]
fn test_check_valid() {
    arialoc()
        .args(["check", "{checkbox checked:true}", "--color", "never"])
        .assert()
        .success()
        .stderr(predicate::str::contains("{checkbox checked:true}"));
}

#[test]
fn test_check_invalid() {
    arialoc().args(["check", "{button"]).assert().failure();
}

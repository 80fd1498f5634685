//! # Resilient CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `resilient` binary: standard flags and
//! argument errors.
//!

mod common;
use common::resilient_cmd;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    resilient_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_flag() {
    resilient_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    resilient_cmd().assert().failure();
}

#[test]
fn test_missing_config_file_is_reported() {
    resilient_cmd()
        .args(["--config", "/nonexistent/resilient.yml", "download"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Configuration error"))
        .stderr(predicate::str::contains("/nonexistent/resilient.yml"));
}

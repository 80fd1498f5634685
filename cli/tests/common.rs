//! # Resilient CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its command with `resilient_cmd()`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings that would otherwise leak in from the developer's shell and take
/// precedence over the configuration file.
const ISOLATED_ENV: [&str; 8] = [
    "RESILIENT_CONFIG",
    "PROJECT_ROOT",
    "RUST_LOG",
    "VIRTUAL_HOST",
    "project_type",
    "jira_code",
    "frmwrk_root",
    "app_root",
];

/// # Get Resilient Command (`resilient_cmd`)
///
/// `assert_cmd::Command` for the compiled `resilient` binary with the
/// configuration-related environment cleared.
///
/// ## Panics
/// Panics if the `resilient` binary cannot be found via `Command::cargo_bin`.
pub fn resilient_cmd() -> Command {
    let mut cmd = Command::cargo_bin("resilient").expect("Failed to find resilient binary for testing");
    for name in ISOLATED_ENV {
        cmd.env_remove(name);
    }
    cmd
}

/// Configuration file body for a project of `project_type`.
pub fn config_yaml(host: &str, project_type: &str, jira_code: &str) -> String {
    format!(
        r#"command:
  resilient:
    VIRTUAL_HOST: {host}
    project_type: {project_type}
    jira_code: {jira_code}
    frmwrk_root: ./framework
    app_root: web
    database:
      host: db
      user: user
      password: user
      name: default
    site:
      name: Acme
      admin_user: admin
      admin_email: admin@acme.test
      admin_password: admin
"#
    )
}

/// Writes `setup/resilient.yml` under `root` and returns its path. The
/// project root used by the tests is `root/project`.
pub fn write_config(root: &Path, body: &str) -> PathBuf {
    let setup = root.join("setup");
    fs::create_dir_all(&setup).expect("create setup dir");
    fs::create_dir_all(root.join("project")).expect("create project dir");
    let path = setup.join("resilient.yml");
    fs::write(&path, body).expect("write config");
    path
}

//! # Resilient Install Integration Tests
//!
//! File: cli/tests/install.rs
//!

mod common;
use common::{config_yaml, resilient_cmd, write_config};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_dry_run_lists_drupal_install() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), &config_yaml("acme.docksal", "drupal8", "ACME"));

    resilient_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--project-root")
        .arg(dir.path().join("project"))
        .args(["--dry-run", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. say: Installing project type 'drupal8'..."))
        .stdout(predicate::str::contains("vendor/bin/drush sql:drop --yes"))
        .stdout(predicate::str::contains("--site-name=Acme"))
        .stdout(predicate::str::contains("4. say: Installing project type 'drupal8'... DONE"));
}

#[test]
fn test_wordpress_install_uses_virtual_host() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), &config_yaml("acme.docksal", "wp", "ACME"));

    resilient_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--dry-run", "i"])
        .assert()
        .success()
        .stdout(predicate::str::contains("core install"))
        .stdout(predicate::str::contains("--url=acme.docksal"))
        .stdout(predicate::str::contains("--skip-email"));
}

#[test]
fn test_install_aborts_on_first_failed_task() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), &config_yaml("acme.docksal", "wp", "ACME"));

    // No framework checkout, so vendor/bin/wp cannot be started.
    resilient_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--project-root")
        .arg(dir.path().join("project"))
        .arg("install")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Installing project type 'wp'..."))
        .stdout(predicate::str::contains("DONE").not())
        .stderr(predicate::str::contains("Error: Task 2/4 failed"));
}

//! # Composer Invocations
//!
//! File: cli/src/plugins/composer.rs
//!
//! Builders for the dependency-manager calls shared by several plugins.
//! All of them run non-interactively.
//!
use crate::common::process::ProcessSpec;
use crate::tasks::Task;
use std::path::Path;

const COMPOSER: &str = "composer";

/// `composer install` in `dir`.
pub fn install(dir: &Path) -> Task {
    ProcessSpec::new(COMPOSER)
        .args(["install", "--no-interaction"])
        .current_dir(dir)
        .into()
}

/// `composer create-project <package> <target>` in `dir`.
pub fn create_project(dir: &Path, package: &str, target: &str) -> Task {
    ProcessSpec::new(COMPOSER)
        .args(["create-project", package, target, "--no-interaction"])
        .current_dir(dir)
        .into()
}

/// `composer require <packages...>` in `dir`.
pub fn require(dir: &Path, packages: &[&str]) -> Task {
    ProcessSpec::new(COMPOSER)
        .arg("require")
        .args(packages.iter().copied())
        .arg("--no-interaction")
        .current_dir(dir)
        .into()
}

/// Either `composer install` in `frmwrk_path` when it already has a
/// manifest, or a fresh `create-project` of `package` from `project_root`.
pub fn install_or_create(
    project_root: &Path,
    frmwrk_path: &Path,
    frmwrk_root: &str,
    package: &str,
) -> Task {
    if frmwrk_path.join("composer.json").exists() {
        install(frmwrk_path)
    } else {
        create_project(project_root, package, frmwrk_root)
    }
}

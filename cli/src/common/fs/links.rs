//! # Resilient Filesystem Link Operations
//!
//! File: cli/src/common/fs/links.rs
//!
//! ## Overview
//!
//! Symbolic links connect shared setup files to the places tools expect
//! them, e.g. the CI pipeline definition kept under `setup/assets/ci/` linked
//! into the project root.
//!
//! `create_symlink`:
//! - Requires the `source` to exist.
//! - Creates the parent directory of `target` if needed.
//! - Leaves a link that already points at `source` untouched.
//! - Renames anything else found at `target` to `<target>.resilient_backup`.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result;
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Creates a symbolic link at `target` pointing to `source`.
///
/// # Errors
///
/// Returns an `Err` if the source is missing, the backup rename fails, or the
/// link cannot be created.
pub fn create_symlink(source: &Path, target: &Path) -> Result<()> {
    info!("Creating symlink from {:?} to {:?}", source, target);

    if !source.exists() {
        bail!("Symlink source path does not exist: {:?}", source);
    }

    if let Some(parent) = target.parent() {
        ensure_dir_exists(parent)
            .with_context(|| format!("Failed to create parent directory for target {:?}", target))?;
    }

    if target.symlink_metadata().is_ok() {
        if points_to(target, source) {
            debug!("Symlink already exists and is correct: {:?}", target);
            return Ok(());
        }
        let backup_path = backup_path_for(target);
        warn!(
            "Target {:?} exists or is a different link, backing up to {:?}",
            target, backup_path
        );
        std::fs::rename(target, &backup_path)
            .with_context(|| format!("Failed to backup existing item at {:?}", target))?;
    }

    link(source, target)
        .with_context(|| format!("Failed to create symlink from {:?} to {:?}", source, target))?;
    info!("Created symlink: {:?} -> {:?}", target, source);
    Ok(())
}

#[cfg(unix)]
fn link(source: &Path, target: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn link(source: &Path, target: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        std::os::windows::fs::symlink_dir(source, target)
    } else {
        std::os::windows::fs::symlink_file(source, target)
    }
}

#[cfg(not(any(unix, windows)))]
fn link(_source: &Path, _target: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}

/// Whether `link` is a symlink resolving to the same place as `source`.
fn points_to(link: &Path, source: &Path) -> bool {
    let Ok(existing) = std::fs::read_link(link) else {
        return false;
    };
    let link_parent = link.parent().unwrap_or_else(|| Path::new("."));
    let resolved = link_parent
        .join(&existing)
        .canonicalize()
        .unwrap_or(existing);
    let canonical_source = source
        .canonicalize()
        .unwrap_or_else(|_| source.to_path_buf());
    resolved == canonical_source
}

fn backup_path_for(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".resilient_backup");
    PathBuf::from(name)
}

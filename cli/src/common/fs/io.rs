//! # Resilient Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Wrappers around `std::fs` used by the task executor, each adding context
//! to the error so a failed task reports which path was involved.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`replace_in_file`**: Replaces every occurrence of a literal string in a
//!   file. A missing search string is not an error; the file is left as is.
//! - **`remove_path`**: Removes a file or directory; absent paths are fine.
//! - **`set_mode_matching`**: `chmod` for the entries of one directory whose
//!   names contain a given fragment (e.g. `*local*`).
//!
use crate::core::error::{ResilientError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ensures that a directory exists at the specified path.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or creating it fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ResilientError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Replaces every occurrence of `from` with `to` in the file at `path`.
///
/// Returns the number of replacements made. The file is only rewritten when
/// at least one occurrence was found.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be read or written.
pub fn replace_in_file(path: &Path, from: &str, to: &str) -> Result<usize> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))?;
    let count = content.matches(from).count();
    if count == 0 {
        warn!("No occurrence of {:?} found in {:?}", from, path);
        return Ok(0);
    }
    fs::write(path, content.replace(from, to))
        .with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Replaced {} occurrence(s) of {:?} in {:?}", count, from, path);
    Ok(count)
}

/// Removes a file, symlink or directory tree. A missing path is a no-op.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = match path.symlink_metadata() {
        Ok(m) => m,
        Err(_) => {
            debug!("Nothing to remove at {:?}", path);
            return Ok(());
        }
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?}", path))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    }
    info!("Removed {:?}", path);
    Ok(())
}

/// Sets `mode` on every regular file in `dir` whose name contains `fragment`.
///
/// Returns the number of files changed. On non-Unix platforms this only logs.
pub fn set_mode_matching(dir: &Path, fragment: &str, mode: u32) -> Result<usize> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {:?}", dir))?;
    let mut changed = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
        let path = entry.path();
        if !path.is_file() || !entry.file_name().to_string_lossy().contains(fragment) {
            continue;
        }
        set_mode(&path, mode)?;
        changed += 1;
    }
    info!(
        "Set mode {:o} on {} file(s) matching '*{}*' in {:?}",
        mode, changed, fragment, dir
    );
    Ok(changed)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions on {:?}", path))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    warn!("Skipping mode {:o} on {:?}: not supported on this platform", mode, path);
    Ok(())
}

//! # Resilient Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Two flavors of copy are needed when provisioning a project:
//! - **`copy_path`**: Copies a single file, or the *contents* of a directory
//!   into a target directory (settings templates into `sites/default`). Uses
//!   the `fs_extra` crate for the directory case, overwriting existing files.
//! - **`mirror_tree`**: Walks a source tree with `walkdir` and recreates it
//!   under the target, overwriting every file (quality tool rulesets into the
//!   project root). Files already in the target but absent from the source are
//!   left alone.
//!
//! Errors are wrapped with `anyhow` context naming both paths.
//!
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{ResilientError, Result};
use anyhow::{anyhow, Context};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Copies a file to `target`, or the contents of a directory into `target`.
///
/// # Arguments
///
/// * `source` - Existing file or directory.
/// * `target` - Destination file path (file source) or directory (directory source).
///   Parent directories are created as needed.
///
/// # Errors
///
/// Returns an `Err` if the source does not exist or any copy fails.
pub fn copy_path(source: &Path, target: &Path) -> Result<()> {
    info!("Copying {:?} to {:?}", source, target);
    if source.is_dir() {
        ensure_dir_exists(target)?;
        let mut options = fs_extra::dir::CopyOptions::new();
        options.overwrite = true;
        options.content_only = true;
        fs_extra::dir::copy(source, target, &options).map_err(|e| {
            anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
        })?;
    } else if source.is_file() {
        if let Some(parent) = target.parent() {
            ensure_dir_exists(parent)?;
        }
        fs::copy(source, target)
            .with_context(|| format!("Failed to copy file {:?} to {:?}", source, target))?;
    } else {
        anyhow::bail!(ResilientError::FileSystem(format!(
            "Copy source does not exist: {:?}",
            source
        )));
    }
    Ok(())
}

/// Recreates the tree under `source` inside `target`, overwriting files.
///
/// Returns the number of files written.
pub fn mirror_tree(source: &Path, target: &Path) -> Result<usize> {
    info!("Mirroring {:?} into {:?}", source, target);
    if !source.is_dir() {
        anyhow::bail!(ResilientError::FileSystem(format!(
            "Mirror source is not a directory: {:?}",
            source
        )));
    }
    let mut files = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", source))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("Unexpected path outside {:?}", source))?;
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            ensure_dir_exists(&destination)?;
        } else {
            fs::copy(entry.path(), &destination).with_context(|| {
                format!("Failed to copy {:?} to {:?}", entry.path(), destination)
            })?;
            debug!("Mirrored {:?}", destination);
            files += 1;
        }
    }
    Ok(files)
}

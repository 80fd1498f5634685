//! # Resilient Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module groups the filesystem operations the task executor performs
//! natively instead of shelling out.
//!
//! ## Architecture
//!
//! - **`copy`**: Copying files and directory contents (`fs_extra`) and
//!   mirroring trees with overwrite (`walkdir`).
//! - **`io`**: Directory creation, in-place string replacement, removal and
//!   permission changes.
//! - **`links`**: Symbolic link creation with backup of whatever was there.
//! - **`paths`**: Lexical path normalization.
//!
//! Callers import the submodule they need, e.g.
//! `use crate::common::fs::io::replace_in_file;`.
//!

/// Copying files, directory contents and mirrored trees.
pub mod copy;
/// Basic I/O: directories, replacements, removal, permissions.
pub mod io;
/// Symbolic link management.
pub mod links;
/// Path normalization helpers.
pub mod paths;

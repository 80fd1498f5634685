//! # Resilient Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the task executor, kept apart from the
//! orchestration code in `tasks`, `plugins` and `commands`:
//!
//! - **`fs`**: Native filesystem operations (copy, mirror, replace, remove,
//!   permissions, symlinks, path normalization).
//! - **`process`**: Running external programs through the `CommandRunner` trait.
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Utilities for executing external processes.
pub mod process;

//! # Resilient Tasks
//!
//! File: cli/src/tasks/mod.rs
//!
//! ## Overview
//!
//! A `Task` is one unit of externally visible work: run a program, change a
//! file, or print a narration line. Plugins produce ordered lists of tasks,
//! commands collect them in a `TaskCollectionBuilder`, and the executor runs
//! them one by one.
//!
//! ## Architecture
//!
//! - `Task` (this file): the closed set of task kinds with their parameters.
//!   Tasks are plain data; constructing one has no side effects.
//! - `executor`: `execute_task`, the single dispatcher that performs a task.
//! - `builder`: `TaskCollectionBuilder`, ordered accumulation and fail-fast
//!   execution.
//!
use crate::common::process::ProcessSpec;
use std::fmt;
use std::path::PathBuf;

pub mod builder;
pub mod executor;

pub use builder::TaskCollectionBuilder;

/// One provisioning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Run an external program.
    RunProcess(ProcessSpec),
    /// Copy a file, or the contents of a directory into a directory.
    CopyPath { source: PathBuf, target: PathBuf },
    /// Recreate a directory tree inside `target`, overwriting files.
    MirrorTree { source: PathBuf, target: PathBuf },
    /// Replace every occurrence of `from` with `to` in a file.
    ReplaceInFile {
        path: PathBuf,
        from: String,
        to: String,
    },
    /// Remove a file or directory if present.
    RemovePath { path: PathBuf },
    /// Set `mode` on files in `dir` whose names contain `name_contains`.
    SetPermissions {
        dir: PathBuf,
        name_contains: String,
        mode: u32,
    },
    /// Create a symbolic link at `target` pointing to `source`.
    Symlink { source: PathBuf, target: PathBuf },
    /// Print a progress message.
    Narrate(String),
}

impl Task {
    pub fn copy(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Task::CopyPath {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn mirror(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Task::MirrorTree {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn replace(path: impl Into<PathBuf>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Task::ReplaceInFile {
            path: path.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn remove(path: impl Into<PathBuf>) -> Self {
        Task::RemovePath { path: path.into() }
    }

    pub fn symlink(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Task::Symlink {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn narrate(message: impl Into<String>) -> Self {
        Task::Narrate(message.into())
    }

    /// Whether this task only prints.
    pub fn is_narration(&self) -> bool {
        matches!(self, Task::Narrate(_))
    }
}

impl From<ProcessSpec> for Task {
    fn from(spec: ProcessSpec) -> Self {
        Task::RunProcess(spec)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::RunProcess(spec) => write!(f, "exec: {}", spec),
            Task::CopyPath { source, target } => {
                write!(f, "copy: {} -> {}", source.display(), target.display())
            }
            Task::MirrorTree { source, target } => {
                write!(f, "mirror: {} -> {}", source.display(), target.display())
            }
            Task::ReplaceInFile { path, from, to } => {
                write!(f, "replace: '{}' -> '{}' in {}", from, to, path.display())
            }
            Task::RemovePath { path } => write!(f, "remove: {}", path.display()),
            Task::SetPermissions {
                dir,
                name_contains,
                mode,
            } => write!(
                f,
                "chmod {:o}: {}/*{}*",
                mode,
                dir.display(),
                name_contains
            ),
            Task::Symlink { source, target } => {
                write!(f, "symlink: {} -> {}", target.display(), source.display())
            }
            Task::Narrate(message) => write!(f, "say: {}", message),
        }
    }
}

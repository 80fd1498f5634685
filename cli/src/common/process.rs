//! # Resilient Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every external tool the provisioning tasks call (`composer`, `wp`,
//! `drush`) goes through this module. A call is described by a
//! `ProcessSpec` (program, arguments, working directory) and run by a
//! `CommandRunner`.
//!
//! ## Architecture
//!
//! - **`ProcessSpec`**: Immutable description of one invocation, built with
//!   chained setters. Its `Display` form is the shell-like command line used in
//!   logs and dry-run listings.
//! - **`CommandRunner`**: Trait the task executor calls. Keeping it a trait
//!   lets unit tests record invocations instead of spawning processes.
//! - **`SystemRunner`**: Production implementation on `std::process::Command`.
//!   Stdio is inherited so tool output streams to the terminal; a non-zero exit
//!   status becomes `ResilientError::ExternalCommand`.
//!
//! ## Usage
//!
//! ```rust
//! let spec = ProcessSpec::new("composer")
//!     .args(["install", "--no-interaction"])
//!     .current_dir("/var/www");
//! SystemRunner.run(&spec)?;
//! ```
//!
use crate::core::error::{ResilientError, Result};
use anyhow::{anyhow, Context};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Description of a single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Convenience for programs addressed by path, e.g. `vendor/bin/wp`.
    pub fn from_path(program: &Path) -> Self {
        Self::new(program.to_string_lossy().into_owned())
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The command line without the working directory.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())?;
        if let Some(cwd) = &self.cwd {
            write!(f, " (in {})", cwd.display())?;
        }
        Ok(())
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.contains(char::is_whitespace) {
        format!("'{}'", part.replace('\'', "'\\''"))
    } else {
        part.to_string()
    }
}

/// Runs external programs on behalf of the task executor.
pub trait CommandRunner {
    /// Runs `spec` to completion.
    ///
    /// # Errors
    ///
    /// Fails if the program cannot be started or exits unsuccessfully.
    fn run(&self, spec: &ProcessSpec) -> Result<()>;
}

/// Runs programs on the host with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &ProcessSpec) -> Result<()> {
        debug!("Running: {}", spec);
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }
        let status = command
            .status()
            .with_context(|| format!("Failed to execute '{}'", spec.program))?;
        debug!("'{}' exited with {}", spec.program, status);

        if status.success() {
            Ok(())
        } else {
            Err(anyhow!(ResilientError::ExternalCommand {
                cmd: spec.command_line(),
                status: status.to_string(),
            }))
        }
    }
}

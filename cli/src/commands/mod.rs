//! # Resilient Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Top-level commands of the `resilient` CLI and the options they share.
//!
//! ## Architecture
//!
//! Each command module exposes two layers:
//! - A builder function (`download::download`, `install::install`) that turns
//!   a `ProjectContext` into a populated `TaskCollectionBuilder` without
//!   touching the filesystem beyond existence checks.
//! - A `handle_*` function used by `main.rs` that initializes the context,
//!   calls the builder function and hands the result to `run_collection`.
//!
//! ## Command Groups
//!
//! - `download`: materializes code, quality tooling and configuration
//! - `install`: (re)installs the site database
//!
use crate::common::process::{CommandRunner, SystemRunner};
use crate::core::context::ProjectContext;
use crate::core::error::Result;
use crate::tasks::TaskCollectionBuilder;
use clap::Args;
use tracing::info;

/// Implements `resilient download`.
pub mod download;
/// Implements `resilient install`.
pub mod install;

/// Options accepted by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file. Searched for from the current directory when omitted.
    #[arg(long, env = "RESILIENT_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Project root on the host. Only the first whitespace-separated token is used.
    #[arg(long, env = "PROJECT_ROOT", global = true, value_name = "PATH")]
    pub project_root: Option<String>,

    /// Print the task list instead of running it.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl GlobalOpts {
    /// Loads configuration and builds the context for this invocation.
    pub fn context(&self) -> Result<ProjectContext> {
        ProjectContext::initialize(self.config.as_deref(), self.project_root.as_deref())
    }
}

/// Prints or executes `builder` depending on `--dry-run`.
pub fn run_collection(builder: TaskCollectionBuilder, opts: &GlobalOpts) -> Result<()> {
    run_collection_with(builder, opts, &SystemRunner)
}

fn run_collection_with(
    builder: TaskCollectionBuilder,
    opts: &GlobalOpts,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let pending = builder.tasks().iter().filter(|t| !t.is_narration()).count();
    if pending == 0 {
        info!("Nothing to do besides narration, project is already provisioned.");
    }
    if opts.dry_run {
        info!("Dry run: listing {} task(s)", builder.len());
        for line in builder.describe() {
            println!("{}", line);
        }
        return Ok(());
    }
    builder.execute(runner)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::RecordingRunner;
    use crate::common::process::ProcessSpec;

    fn collection() -> TaskCollectionBuilder {
        let mut builder = TaskCollectionBuilder::new();
        builder
            .add_narration("Installing...")
            .append(ProcessSpec::new("drush"));
        builder
    }

    #[test]
    fn test_dry_run_executes_nothing() {
        let runner = RecordingRunner::default();
        let opts = GlobalOpts {
            dry_run: true,
            ..GlobalOpts::default()
        };
        run_collection_with(collection(), &opts, &runner).unwrap();
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_run_executes_collection() {
        let runner = RecordingRunner::default();
        run_collection_with(collection(), &GlobalOpts::default(), &runner).unwrap();
        assert_eq!(*runner.calls.borrow(), vec!["drush".to_string()]);
    }

    #[test]
    fn test_run_propagates_failure() {
        let runner = RecordingRunner::failing_on("drush");
        assert!(run_collection_with(collection(), &GlobalOpts::default(), &runner).is_err());
    }
}

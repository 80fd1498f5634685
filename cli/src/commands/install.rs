//! # Resilient Install Command
//!
//! File: cli/src/commands/install.rs
//!
//! Implements `resilient install`: asks the CMS plugin for `project_type` for
//! its install tasks. There is no marker check, so every run resets the site
//! database.
//!
use crate::commands::{run_collection, GlobalOpts};
use crate::core::context::ProjectContext;
use crate::core::error::{ResilientError, Result};
use crate::plugins::PluginFactory;
use crate::tasks::TaskCollectionBuilder;
use anyhow::anyhow;
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug, Default)]
#[command(
    about = "Install the site for the configured project type",
    long_about = "Runs the CMS installer for the configured project type.\n\
                  WARNING: this drops and recreates the site database on every run."
)]
pub struct InstallArgs {}

/// # Handle Install Command (`handle_install`)
pub fn handle_install(_args: InstallArgs, opts: &GlobalOpts) -> Result<()> {
    info!("Handling install command...");
    let ctx = opts.context()?;
    let builder = install(&ctx)?;
    if !opts.dry_run {
        warn!("Resetting the site database for '{}'", ctx.project_type);
    }
    run_collection(builder, opts)
}

/// Builds the install tasks for `ctx` without running them.
///
/// # Errors
///
/// `ResilientError::MissingCapability` when the plugin for the project type
/// cannot install.
pub fn install(ctx: &ProjectContext) -> Result<TaskCollectionBuilder> {
    let plugin = PluginFactory::new(ctx).for_project_type(ctx.project_type)?;
    let installer = plugin.as_installer().ok_or_else(|| {
        anyhow!(ResilientError::MissingCapability {
            plugin: plugin.key().to_string(),
            capability: "install",
        })
    })?;

    let message = format!("Installing project type '{}'...", ctx.project_type);
    let mut builder = TaskCollectionBuilder::new();
    builder
        .add_narration(message.as_str())
        .append_all(installer.install()?)
        .add_narration(format!("{} DONE", message));
    Ok(builder)
}

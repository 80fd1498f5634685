//! # Resilient Download Command
//!
//! File: cli/src/commands/download.rs
//!
//! ## Overview
//!
//! Implements `resilient download`: fetches framework code and drops the
//! project's quality tooling and local configuration in place. Every plugin
//! checks its own marker file, so re-running on a provisioned project only
//! prints the narration.
//!
//! ## Task Order
//!
//! 1. Quality tools (`grumphp.yml`)
//! 2. Extra packages (`composer.extra.json`)
//! 3. CI link, only when `ci_config` is set
//! 4. The CMS plugin for `project_type`
//!
//! Each group is bracketed by a start and a `... DONE` narration.
//!
//! ## Usage
//!
//! ```bash
//! resilient download
//! resilient --dry-run download
//! ```
//!
use crate::commands::{run_collection, GlobalOpts};
use crate::core::context::ProjectContext;
use crate::core::error::{ResilientError, Result};
use crate::plugins::ci_link::CI_CONFIG_KEY;
use crate::plugins::{factory, PluginFactory};
use crate::tasks::TaskCollectionBuilder;
use anyhow::anyhow;
use clap::Parser;
use tracing::{debug, info};

const DOWNLOAD_MESSAGE: &str = "Downloading project files...";

#[derive(Parser, Debug, Default)]
#[command(about = "Download framework code, quality tools and local configuration")]
pub struct DownloadArgs {}

/// # Handle Download Command (`handle_download`)
///
/// Builds the download collection for the configured project and runs it, or
/// lists it under `--dry-run`.
pub fn handle_download(_args: DownloadArgs, opts: &GlobalOpts) -> Result<()> {
    info!("Handling download command...");
    let ctx = opts.context()?;
    let builder = download(&ctx)?;
    run_collection(builder, opts)
}

/// Builds the ordered download tasks for `ctx` without running them.
pub fn download(ctx: &ProjectContext) -> Result<TaskCollectionBuilder> {
    let factory = PluginFactory::new(ctx);
    let mut builder = TaskCollectionBuilder::new();
    builder.add_narration(DOWNLOAD_MESSAGE);

    let mut groups = vec![
        (factory::QUALITY_TOOLS, "Downloading quality tools...".to_string()),
        (
            factory::EXTRA_PACKAGES,
            "Downloading additional PHP packages...".to_string(),
        ),
    ];
    if ctx.config.contains(CI_CONFIG_KEY) {
        groups.push((factory::CI_LINK, "Linking CI configuration...".to_string()));
    } else {
        debug!("'{}' not set, no CI link", CI_CONFIG_KEY);
    }
    groups.push((
        ctx.project_type.key(),
        format!(
            "Downloading core project files for type '{}'...",
            ctx.project_type
        ),
    ));

    for (key, message) in groups {
        let plugin = factory.create_instance(key)?;
        let downloader = plugin.as_downloader().ok_or_else(|| {
            anyhow!(ResilientError::MissingCapability {
                plugin: key.to_string(),
                capability: "download",
            })
        })?;
        let tasks = downloader.download()?;
        debug!("Plugin '{}' produced {} task(s)", key, tasks.len());

        builder
            .add_narration(message.as_str())
            .append_all(tasks)
            .add_narration(format!("{} DONE", message));
    }

    builder.add_narration(format!("{} DONE", DOWNLOAD_MESSAGE));
    Ok(builder)
}

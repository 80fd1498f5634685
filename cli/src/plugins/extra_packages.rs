//! # Extra Packages Plugin
//!
//! File: cli/src/plugins/extra_packages.rs
//!
//! Adds the project-type specific `composer.extra.json` manifest to the
//! project root and reinstalls root dependencies so the extra packages are
//! picked up. The lock file is dropped first because it no longer matches.
//! Runs only once: an existing `composer.extra.json` in the root is the marker.
//!
use crate::core::context::ProjectContext;
use crate::core::error::Result;
use crate::plugins::{composer, Downloader};
use crate::tasks::Task;
use tracing::debug;

const EXTRA_MANIFEST: &str = "composer.extra.json";

#[derive(Debug)]
pub struct ExtraPackagesPlugin<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> ExtraPackagesPlugin<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }
}

impl Downloader for ExtraPackagesPlugin<'_> {
    fn download(&self) -> Result<Vec<Task>> {
        let root = &self.ctx.project_root;
        let source = self.ctx.type_assets_dir().join(EXTRA_MANIFEST);
        let destination = root.join(EXTRA_MANIFEST);

        if destination.exists() || !source.exists() {
            debug!(
                "Skipping extra packages (destination exists: {}, source exists: {})",
                destination.exists(),
                source.exists()
            );
            return Ok(Vec::new());
        }

        Ok(vec![
            Task::copy(source, destination),
            Task::remove(root.join("composer.lock")),
            composer::install(root),
        ])
    }
}

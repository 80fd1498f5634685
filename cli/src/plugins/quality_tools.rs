//! # Quality Tools Plugin
//!
//! File: cli/src/plugins/quality_tools.rs
//!
//! Installs the GrumPHP ruleset shipped in `assets/<type>/grumphp` into the
//! project root and stamps the project's tracking code into `grumphp.yml`.
//! Nothing is emitted when the project has no ruleset for its type or the
//! root already holds a `grumphp.yml`.
//!
use crate::core::context::ProjectContext;
use crate::core::error::Result;
use crate::plugins::Downloader;
use crate::tasks::Task;
use tracing::debug;

const RULESET_FILE: &str = "grumphp.yml";
const TRACKING_CODE_TOKEN: &str = "[jira_code]";

#[derive(Debug)]
pub struct QualityToolsPlugin<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> QualityToolsPlugin<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }
}

impl Downloader for QualityToolsPlugin<'_> {
    fn download(&self) -> Result<Vec<Task>> {
        let source = self.ctx.type_assets_dir().join("grumphp");
        let ruleset = self.ctx.project_root.join(RULESET_FILE);

        if !source.is_dir() {
            debug!("No quality tool assets at {}", source.display());
            return Ok(Vec::new());
        }
        if ruleset.exists() {
            debug!("{} already present, skipping", ruleset.display());
            return Ok(Vec::new());
        }

        Ok(vec![
            Task::mirror(source, &self.ctx.project_root),
            Task::replace(ruleset, TRACKING_CODE_TOKEN, self.ctx.get("jira_code")?),
        ])
    }
}

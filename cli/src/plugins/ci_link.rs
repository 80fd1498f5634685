//! # CI Link Plugin
//!
//! File: cli/src/plugins/ci_link.rs
//!
//! Links the shared CI pipeline definition named by the `ci_config` setting
//! (e.g. `.gitlab-ci.yml`) from `assets/ci/` into the project root, so every
//! project picks up changes to the shared file. Skipped when the root already
//! has a file of that name or the asset is missing.
//!
use crate::core::context::ProjectContext;
use crate::core::error::Result;
use crate::plugins::Downloader;
use crate::tasks::Task;
use tracing::debug;

/// Setting naming the CI file; the download command only uses this plugin
/// when it is set.
pub const CI_CONFIG_KEY: &str = "ci_config";

#[derive(Debug)]
pub struct CiLinkPlugin<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> CiLinkPlugin<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }
}

impl Downloader for CiLinkPlugin<'_> {
    fn download(&self) -> Result<Vec<Task>> {
        let file_name = self.ctx.get(CI_CONFIG_KEY)?;
        let source = self.ctx.assets_dir().join("ci").join(&file_name);
        let target = self.ctx.project_root.join(&file_name);

        if target.symlink_metadata().is_ok() || !source.exists() {
            debug!("Skipping CI link for {}", file_name);
            return Ok(Vec::new());
        }
        Ok(vec![Task::symlink(source, target)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::testing::context_for;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_download_links_ci_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("setup/assets/ci")).unwrap();
        fs::write(dir.path().join("setup/assets/ci/.gitlab-ci.yml"), "").unwrap();
        let ctx = context_for(dir.path(), "wp", &[(CI_CONFIG_KEY, ".gitlab-ci.yml")]);

        let tasks = CiLinkPlugin::new(&ctx).download().unwrap();

        assert_eq!(
            tasks,
            vec![Task::symlink(
                dir.path().join("setup/assets/ci/.gitlab-ci.yml"),
                dir.path().join("project/.gitlab-ci.yml")
            )]
        );
    }

    #[test]
    fn test_download_requires_setting() {
        let dir = tempdir().unwrap();
        let ctx = context_for(dir.path(), "wp", &[]);
        assert!(CiLinkPlugin::new(&ctx).download().is_err());
    }

    #[test]
    fn test_download_skips_existing_target() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("setup/assets/ci")).unwrap();
        fs::write(dir.path().join("setup/assets/ci/.gitlab-ci.yml"), "").unwrap();
        fs::create_dir_all(dir.path().join("project")).unwrap();
        fs::write(dir.path().join("project/.gitlab-ci.yml"), "custom").unwrap();
        let ctx = context_for(dir.path(), "wp", &[(CI_CONFIG_KEY, ".gitlab-ci.yml")]);

        assert!(CiLinkPlugin::new(&ctx).download().unwrap().is_empty());
    }
}

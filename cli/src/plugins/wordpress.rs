//! # WordPress Plugin (`wp`)
//!
//! File: cli/src/plugins/wordpress.rs
//!
//! ## Download
//!
//! Marker: `<frmwrk>/<app_root>/wp-load.php`. When it is missing the plugin
//! installs framework dependencies, or creates a WordPlate skeleton and adds
//! WP-CLI plus the starter theme. It then installs the dotenv package for
//! WP-CLI, writes one `.env` entry per database setting (and `WP_ENV`), and
//! generates the salts.
//!
//! ## Install
//!
//! `wp db reset` followed by `wp core install` with the configured site
//! identity. Always destructive.
//!
use crate::common::process::ProcessSpec;
use crate::core::context::ProjectContext;
use crate::core::error::Result;
use crate::plugins::{composer, Downloader, Installer};
use crate::tasks::Task;
use std::path::PathBuf;
use tracing::debug;

const WP_PROJECT: &str = "wordplate/wordplate";
const WP_CLI: &str = "wp-cli/wp-cli";
const WP_CLI_PACKAGE: &str = "wp-cli/package-command";
const WP_CLI_DOTENV: &str = "aaemnnosttv/wp-cli-dotenv-command";
const WP_TIMBER_STARTER: &str = "upstatement/timber-starter-theme:dev-master";

/// `.env` variable → configuration key.
const DOTENV_SETTINGS: [(&str, &str); 4] = [
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_HOST", "database.host"),
];

#[derive(Debug)]
pub struct WordpressPlugin<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> WordpressPlugin<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }

    fn wp(&self) -> ProcessSpec {
        ProcessSpec::from_path(&self.ctx.frmwrk_path.join("vendor/bin/wp"))
    }

    fn dotenv_file_arg(&self) -> String {
        format!("--file={}", self.ctx.frmwrk_path.join(".env").display())
    }

    fn core_path_arg(&self) -> Result<String> {
        Ok(format!("--path={}", self.core_dir()?.display()))
    }

    fn core_dir(&self) -> Result<PathBuf> {
        self.ctx.app_path()
    }
}

impl Downloader for WordpressPlugin<'_> {
    fn download(&self) -> Result<Vec<Task>> {
        let marker = self.core_dir()?.join("wp-load.php");
        if marker.exists() {
            debug!("{} exists, WordPress already downloaded", marker.display());
            return Ok(Vec::new());
        }

        let frmwrk = &self.ctx.frmwrk_path;
        let mut tasks = Vec::new();
        if frmwrk.join("composer.json").exists() {
            tasks.push(composer::install(frmwrk));
        } else {
            tasks.push(composer::create_project(
                &self.ctx.project_root,
                WP_PROJECT,
                &self.ctx.get("frmwrk_root")?,
            ));
            tasks.push(composer::require(
                frmwrk,
                &[WP_CLI, WP_CLI_PACKAGE, WP_TIMBER_STARTER],
            ));
        }

        tasks.push(self.wp().args(["package", "install", WP_CLI_DOTENV]).into());

        let mut env = Vec::with_capacity(DOTENV_SETTINGS.len() + 1);
        for (name, key) in DOTENV_SETTINGS {
            env.push((name, self.ctx.get(key)?));
        }
        env.push(("WP_ENV", "local".to_string()));
        for (name, value) in env {
            tasks.push(
                self.wp()
                    .args(["dotenv", "set", name])
                    .arg(value)
                    .arg(self.dotenv_file_arg())
                    .into(),
            );
        }

        tasks.push(
            self.wp()
                .args(["dotenv", "salts", "generate"])
                .arg(self.dotenv_file_arg())
                .into(),
        );
        Ok(tasks)
    }
}

impl Installer for WordpressPlugin<'_> {
    fn install(&self) -> Result<Vec<Task>> {
        let path = self.core_path_arg()?;
        Ok(vec![
            self.wp()
                .args(["db", "reset", "--yes"])
                .arg(path.clone())
                .into(),
            self.wp()
                .args(["core", "install"])
                .arg(path)
                .arg(format!("--url={}", self.ctx.get("VIRTUAL_HOST")?))
                .arg(format!("--title={}", self.ctx.get("site.name")?))
                .arg(format!("--admin_user={}", self.ctx.get("site.admin_user")?))
                .arg(format!("--admin_email={}", self.ctx.get("site.admin_email")?))
                .arg(format!(
                    "--admin_password={}",
                    self.ctx.get("site.admin_password")?
                ))
                .arg("--skip-email")
                .into(),
        ])
    }
}

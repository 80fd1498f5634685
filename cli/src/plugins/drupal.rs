//! # Drupal Plugin (`drupal8`)
//!
//! File: cli/src/plugins/drupal.rs
//!
//! ## Download
//!
//! Marker: `<frmwrk>/<app_root>/sites/default/settings.local.php`. When it is
//! missing the plugin:
//! 1. Installs framework dependencies, or creates the project skeleton from
//!    the `lammensj/drupal-project` template when there is no manifest yet
//! 2. Copies the local settings templates (`assets/drupal8/core`) into
//!    `sites/default`
//! 3. Writes the database credentials into `settings.local.php`
//! 4. Uncomments the `settings.local.php` include in `settings.php`
//! 5. Restricts the local settings files to mode 0644
//!
//! ## Install
//!
//! Drops every table and runs a standard `drush site:install` with the
//! configured site name and admin account. Always destructive.
//!
use crate::common::process::ProcessSpec;
use crate::core::context::ProjectContext;
use crate::core::error::Result;
use crate::plugins::{composer, Downloader, Installer};
use crate::tasks::Task;
use std::path::PathBuf;
use tracing::debug;

const DRUPAL_PROJECT: &str = "lammensj/drupal-project:^2.0";

/// Placeholder → configuration key, in the order they are substituted.
const DB_PLACEHOLDERS: [(&str, &str); 4] = [
    ("INSERT_DB_HOST", "database.host"),
    ("INSERT_DB_USER", "database.user"),
    ("INSERT_DB_PASSWORD", "database.password"),
    ("INSERT_DB_NAME", "database.name"),
];

/// Edits that enable the commented-out local settings include.
const INCLUDE_LOCAL_SETTINGS: [(&str, &str); 3] = [
    ("# if (file_exists", "if (file_exists"),
    ("#   include", "  include"),
    ("# }", "}"),
];

#[derive(Debug)]
pub struct DrupalPlugin<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> DrupalPlugin<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }

    fn default_site_dir(&self) -> Result<PathBuf> {
        Ok(self.ctx.app_path()?.join("sites").join("default"))
    }

    fn drush(&self) -> ProcessSpec {
        ProcessSpec::from_path(&self.ctx.frmwrk_path.join("vendor/bin/drush"))
            .current_dir(&self.ctx.frmwrk_path)
    }
}

impl Downloader for DrupalPlugin<'_> {
    fn download(&self) -> Result<Vec<Task>> {
        let site_dir = self.default_site_dir()?;
        let local_settings = site_dir.join("settings.local.php");
        if local_settings.exists() {
            debug!("{} exists, Drupal already downloaded", local_settings.display());
            return Ok(Vec::new());
        }

        let mut tasks = vec![composer::install_or_create(
            &self.ctx.project_root,
            &self.ctx.frmwrk_path,
            &self.ctx.get("frmwrk_root")?,
            DRUPAL_PROJECT,
        )];

        tasks.push(Task::copy(self.ctx.type_assets_dir().join("core"), &site_dir));

        for (placeholder, key) in DB_PLACEHOLDERS {
            tasks.push(Task::replace(&local_settings, placeholder, self.ctx.get(key)?));
        }

        let settings = site_dir.join("settings.php");
        for (from, to) in INCLUDE_LOCAL_SETTINGS {
            tasks.push(Task::replace(&settings, from, to));
        }

        tasks.push(Task::SetPermissions {
            dir: site_dir,
            name_contains: "local".to_string(),
            mode: 0o644,
        });
        Ok(tasks)
    }
}

impl Installer for DrupalPlugin<'_> {
    fn install(&self) -> Result<Vec<Task>> {
        Ok(vec![
            self.drush().args(["sql:drop", "--yes"]).into(),
            self.drush()
                .args(["site:install", "standard", "--yes"])
                .arg(format!("--site-name={}", self.ctx.get("site.name")?))
                .arg(format!("--account-name={}", self.ctx.get("site.admin_user")?))
                .arg(format!("--account-mail={}", self.ctx.get("site.admin_email")?))
                .arg(format!("--account-pass={}", self.ctx.get("site.admin_password")?))
                .into(),
        ])
    }
}

//! # Resilient Project Context
//!
//! File: cli/src/core/context.rs
//!
//! ## Overview
//!
//! The project context is the shared, read-only state every command and
//! plugin works from. It is built exactly once per invocation by
//! `ProjectContext::initialize`, which:
//! 1. Locates and loads the configuration file
//! 2. Builds a `ConfigResolver` over the file and the process environment
//! 3. Validates the configuration (aggregated errors)
//! 4. Derives the project root, setup path and framework path
//!
//! Plugins borrow the context; nothing in it changes after initialization.
//!
use crate::common::fs::paths::normalize_lexically;
use crate::core::config::{self, ConfigResolver};
use crate::core::error::{ResilientError, Result};
use anyhow::{anyhow, Context};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported CMS project types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    Drupal8,
    Wordpress,
}

impl ProjectType {
    /// Every supported project type, in registry order.
    pub const ALL: [ProjectType; 2] = [ProjectType::Drupal8, ProjectType::Wordpress];

    /// Configuration value (and plugin key) for this project type.
    pub fn key(self) -> &'static str {
        match self {
            ProjectType::Drupal8 => "drupal8",
            ProjectType::Wordpress => "wp",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.key()).collect()
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Shared state for one command invocation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Resolver for every configuration lookup.
    pub config: ConfigResolver,
    /// Absolute project root (host checkout mounted in the container).
    pub project_root: PathBuf,
    /// Directory holding the configuration file and its `assets/` tree.
    pub setup_path: PathBuf,
    /// `project_root/frmwrk_root`, normalized.
    pub frmwrk_path: PathBuf,
    /// Validated project type.
    pub project_type: ProjectType,
}

impl ProjectContext {
    /// # Initialize Context (`initialize`)
    ///
    /// Loads configuration and builds the context for a command run.
    ///
    /// ## Arguments
    ///
    /// * `config_path` - Explicit configuration file (`--config` / `RESILIENT_CONFIG`).
    ///   When `None`, the file is discovered from the current directory.
    /// * `project_root` - Raw project root (`--project-root` / `PROJECT_ROOT`).
    ///   Only the first whitespace-separated token is used. Defaults to the
    ///   current directory.
    ///
    /// ## Errors
    ///
    /// Fails on a missing or unreadable configuration file, a missing required
    /// key, or a validation failure. No tasks exist yet at that point.
    pub fn initialize(config_path: Option<&str>, project_root: Option<&str>) -> Result<Self> {
        let config_file = config::resolve_config_path(config_path)?;
        let tree = config::load_tree(&config_file)?;
        let resolver = ConfigResolver::from_process_env(tree);

        let setup_path = setup_path_for(&config_file)?;

        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let root = project_root
            .and_then(|raw| raw.split_whitespace().next())
            .map(|token| current_dir.join(token))
            .unwrap_or(current_dir);

        Self::from_resolver(resolver, root, setup_path)
    }

    /// Validates `config` and derives the remaining paths.
    pub fn from_resolver(
        config: ConfigResolver,
        project_root: PathBuf,
        setup_path: PathBuf,
    ) -> Result<Self> {
        config::validate(&config)?;

        let type_key = config.get("project_type")?;
        let project_type = ProjectType::from_key(&type_key)
            .ok_or_else(|| anyhow!(ResilientError::UnknownPlugin(type_key.clone())))?;

        let project_root = normalize_lexically(&project_root);
        let frmwrk_path = normalize_lexically(&project_root.join(config.get("frmwrk_root")?));

        info!(
            "Project '{}' at {} (framework: {})",
            project_type,
            project_root.display(),
            frmwrk_path.display()
        );
        debug!("Setup path: {}", setup_path.display());

        Ok(Self {
            config,
            project_root,
            setup_path,
            frmwrk_path,
            project_type,
        })
    }

    /// Shorthand for `self.config.get(key)`.
    pub fn get(&self, key: &str) -> Result<String> {
        self.config.get(key)
    }

    /// `<setup_path>/assets`
    pub fn assets_dir(&self) -> PathBuf {
        self.setup_path.join("assets")
    }

    /// `<setup_path>/assets/<project_type>`
    pub fn type_assets_dir(&self) -> PathBuf {
        self.assets_dir().join(self.project_type.key())
    }

    /// `<frmwrk_path>/<app_root>`: the CMS document root.
    pub fn app_path(&self) -> Result<PathBuf> {
        Ok(self.frmwrk_path.join(self.get("app_root")?))
    }
}

/// Absolute directory holding `config_file`. A bare file name resolves to
/// the current directory.
fn setup_path_for(config_file: &Path) -> Result<PathBuf> {
    let setup_dir = config_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    setup_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve setup path {}", setup_dir.display()))
}

// --- Test Support ---
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::config::CONFIG_PREFIX;
    use std::collections::BTreeMap;

    /// Configuration for a customized `project_type` project rooted at
    /// `root/project` with setup files in `root/setup`.
    pub fn context_for(root: &Path, project_type: &str, extra: &[(&str, &str)]) -> ProjectContext {
        let mut entries = vec![
            ("VIRTUAL_HOST", "acme.docksal"),
            ("project_type", project_type),
            ("jira_code", "ACME"),
            ("frmwrk_root", "./framework"),
            ("app_root", "web"),
            ("database.host", "db"),
            ("database.user", "user"),
            ("database.password", "secret"),
            ("database.name", "default"),
            ("site.name", "Acme"),
            ("site.admin_user", "admin"),
            ("site.admin_email", "a@acme.test"),
            ("site.admin_password", "admin"),
        ];
        entries.extend_from_slice(extra);
        let tree: BTreeMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (format!("{}.{}", CONFIG_PREFIX, k), v.to_string()))
            .collect();
        let resolver = ConfigResolver::new(tree, Vec::new());
        ProjectContext::from_resolver(resolver, root.join("project"), root.join("setup"))
            .expect("test configuration should be valid")
    }
}

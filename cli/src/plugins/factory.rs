//! # Resilient Plugin Factory
//!
//! File: cli/src/plugins/factory.rs
//!
//! Fixed registry from plugin key to constructor. The CMS keys match the
//! `project_type` configuration values; the other keys name cross-cutting
//! plugins every download uses.
//!
use crate::core::context::{ProjectContext, ProjectType};
use crate::core::error::{ResilientError, Result};
use crate::plugins::{
    CiLinkPlugin, DrupalPlugin, ExtraPackagesPlugin, Plugin, QualityToolsPlugin, WordpressPlugin,
};
use anyhow::anyhow;
use tracing::debug;

pub const QUALITY_TOOLS: &str = "quality-tools";
pub const EXTRA_PACKAGES: &str = "extra-packages";
pub const CI_LINK: &str = "ci-link";
pub const DRUPAL8: &str = "drupal8";
pub const WORDPRESS: &str = "wp";

type Constructor = for<'a> fn(&'a ProjectContext) -> Plugin<'a>;

fn quality_tools(ctx: &ProjectContext) -> Plugin<'_> {
    Plugin::QualityTools(QualityToolsPlugin::new(ctx))
}

fn extra_packages(ctx: &ProjectContext) -> Plugin<'_> {
    Plugin::ExtraPackages(ExtraPackagesPlugin::new(ctx))
}

fn ci_link(ctx: &ProjectContext) -> Plugin<'_> {
    Plugin::CiLink(CiLinkPlugin::new(ctx))
}

fn drupal(ctx: &ProjectContext) -> Plugin<'_> {
    Plugin::Drupal(DrupalPlugin::new(ctx))
}

fn wordpress(ctx: &ProjectContext) -> Plugin<'_> {
    Plugin::Wordpress(WordpressPlugin::new(ctx))
}

/// Key → constructor registry.
const REGISTRY: [(&str, Constructor); 5] = [
    (QUALITY_TOOLS, quality_tools),
    (EXTRA_PACKAGES, extra_packages),
    (CI_LINK, ci_link),
    (DRUPAL8, drupal),
    (WORDPRESS, wordpress),
];

/// Creates plugins over a shared project context.
#[derive(Debug, Clone, Copy)]
pub struct PluginFactory<'a> {
    ctx: &'a ProjectContext,
}

impl<'a> PluginFactory<'a> {
    pub fn new(ctx: &'a ProjectContext) -> Self {
        Self { ctx }
    }

    /// Every registered key, in registry order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(key, _)| *key)
    }

    /// Creates the plugin registered under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ResilientError::UnknownPlugin` if `key` is not registered.
    pub fn create_instance(&self, key: &str) -> Result<Plugin<'a>> {
        let (_, construct) = REGISTRY
            .iter()
            .find(|(registered, _)| *registered == key)
            .ok_or_else(|| {
                debug!("Registered plugins: {:?}", Self::keys().collect::<Vec<_>>());
                anyhow!(ResilientError::UnknownPlugin(key.to_string()))
            })?;
        debug!("Creating plugin '{}'", key);
        Ok(construct(self.ctx))
    }

    /// Creates the CMS plugin for the configured project type.
    pub fn for_project_type(&self, project_type: ProjectType) -> Result<Plugin<'a>> {
        self.create_instance(project_type.key())
    }
}

//! # Resilient Plugins
//!
//! File: cli/src/plugins/mod.rs
//!
//! ## Overview
//!
//! A plugin turns the project context into an ordered list of tasks for one
//! concern: quality tooling, extra packages, the CI link, or a specific CMS.
//! Plugins are stateless; each borrows the `ProjectContext` and is created
//! fresh by the factory for every command run.
//!
//! ## Architecture
//!
//! - `Downloader` / `Installer`: the two capabilities a plugin may offer.
//! - `Plugin`: tagged variant over the concrete plugins. `as_downloader` and
//!   `as_installer` expose whichever capabilities the variant has.
//! - `factory`: maps registry keys to plugins.
//!
//! ## Idempotency
//!
//! `download` inspects the filesystem first and returns no tasks when its
//! marker file shows the work was already done. `install` never checks: it
//! always re-applies, which resets the site database on every run.
//!
use crate::core::error::Result;
use crate::tasks::Task;

pub mod ci_link;
pub mod composer;
pub mod drupal;
pub mod extra_packages;
pub mod factory;
pub mod quality_tools;
pub mod wordpress;

pub use factory::PluginFactory;

use ci_link::CiLinkPlugin;
use drupal::DrupalPlugin;
use extra_packages::ExtraPackagesPlugin;
use quality_tools::QualityToolsPlugin;
use wordpress::WordpressPlugin;

/// Produces the tasks that materialize code and configuration.
pub trait Downloader {
    fn download(&self) -> Result<Vec<Task>>;
}

/// Produces the tasks that (re)install the site.
pub trait Installer {
    fn install(&self) -> Result<Vec<Task>>;
}

/// A plugin created by the factory.
#[derive(Debug)]
pub enum Plugin<'a> {
    QualityTools(QualityToolsPlugin<'a>),
    ExtraPackages(ExtraPackagesPlugin<'a>),
    CiLink(CiLinkPlugin<'a>),
    Drupal(DrupalPlugin<'a>),
    Wordpress(WordpressPlugin<'a>),
}

impl<'a> Plugin<'a> {
    /// Registry key this plugin was created for.
    pub fn key(&self) -> &'static str {
        match self {
            Plugin::QualityTools(_) => factory::QUALITY_TOOLS,
            Plugin::ExtraPackages(_) => factory::EXTRA_PACKAGES,
            Plugin::CiLink(_) => factory::CI_LINK,
            Plugin::Drupal(_) => factory::DRUPAL8,
            Plugin::Wordpress(_) => factory::WORDPRESS,
        }
    }

    pub fn as_downloader(&self) -> Option<&dyn Downloader> {
        match self {
            Plugin::QualityTools(p) => Some(p),
            Plugin::ExtraPackages(p) => Some(p),
            Plugin::CiLink(p) => Some(p),
            Plugin::Drupal(p) => Some(p),
            Plugin::Wordpress(p) => Some(p),
        }
    }

    pub fn as_installer(&self) -> Option<&dyn Installer> {
        match self {
            Plugin::Drupal(p) => Some(p),
            Plugin::Wordpress(p) => Some(p),
            Plugin::QualityTools(_) | Plugin::ExtraPackages(_) | Plugin::CiLink(_) => None,
        }
    }
}

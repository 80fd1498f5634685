//! # Resilient Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the project configuration file, resolves individual
//! settings and validates the result before any task is built. It covers:
//! - Locating the configuration file (`--config` / `RESILIENT_CONFIG`, or discovery)
//! - Parsing YAML or TOML into a flat, dotted-key tree
//! - Resolving keys with environment variables taking precedence (`ConfigResolver`)
//! - Aggregated validation of placeholder values and the project type
//!
//! ## Architecture
//!
//! Settings live under the `command.resilient` namespace of the file:
//!
//! ```yaml
//! command:
//!   resilient:
//!     project_type: wp
//!     jira_code: ACME
//!     database:
//!       host: db
//! ```
//!
//! Lookup order for `get("database.host")`:
//! 1. An environment variable named exactly `database.host` (non-empty)
//! 2. The tree entry `command.resilient.database.host`
//! 3. Otherwise a `ResilientError::Config` error; there are no defaults.
//!
//! The environment is captured once when the resolver is built, so the
//! configuration is read-only for the rest of the invocation.
//!
use crate::core::context::ProjectType;
use crate::core::error::{ResilientError, Result};
use anyhow::{anyhow, Context};
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Namespace under which all settings live in the configuration tree.
pub const CONFIG_PREFIX: &str = "command.resilient";

/// Host value shipped in the sample environment file.
pub const PLACEHOLDER_HOST: &str = "customize-me.docksal";

/// Tracking code value shipped in the sample configuration file.
pub const PLACEHOLDER_TRACKING_CODE: &str = "CUSTOMIZEME";

/// File names searched for when no configuration path is given, relative to
/// the current directory and each of its ancestors.
const CONFIG_CANDIDATES: [&str; 4] = [
    "resilient.yml",
    "resilient.yaml",
    "resilient.toml",
    ".docksal/resilient.yml",
];

/// Resolves named settings from the environment and the loaded tree.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    env: HashMap<String, String>,
    tree: BTreeMap<String, String>,
}

impl ConfigResolver {
    /// Builds a resolver from a flattened tree and an explicit environment.
    pub fn new<I>(tree: BTreeMap<String, String>, env: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            env: env.into_iter().collect(),
            tree,
        }
    }

    /// Builds a resolver over a snapshot of the process environment.
    pub fn from_process_env(tree: BTreeMap<String, String>) -> Self {
        Self::new(tree, utf8_vars(std::env::vars_os()))
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        if let Some(value) = self.env.get(key).filter(|v| !v.is_empty()) {
            return Some(value);
        }
        self.tree
            .get(&format!("{}.{}", CONFIG_PREFIX, key))
            .map(String::as_str)
    }

    /// Returns the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `ResilientError::Config` when neither the environment nor the
    /// tree defines the key.
    pub fn get(&self, key: &str) -> Result<String> {
        self.lookup(key).map(str::to_string).ok_or_else(|| {
            anyhow!(ResilientError::Config(format!(
                "key '{}.{}' not found.",
                CONFIG_PREFIX, key
            )))
        })
    }

    /// Whether `key` resolves from either source.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

/// Keeps the variables whose name and value are both valid UTF-8. Anything
/// else cannot name or hold a setting.
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter().filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
        (Ok(key), Ok(value)) => Some((key, value)),
        (key, _) => {
            debug!("Ignoring non UTF-8 environment variable {:?}", key);
            None
        }
    })
}

/// Determines which configuration file to load.
///
/// An explicit path (flag or `RESILIENT_CONFIG`) wins and has `~` expanded.
/// Otherwise the current directory and its ancestors are searched for one of
/// the known file names, stopping at the repository root (`.git`).
///
/// # Errors
///
/// Returns `ResilientError::Config` if an explicit path does not exist or no
/// candidate file is found.
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(raw) = explicit {
        let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
        if !path.is_file() {
            return Err(anyhow!(ResilientError::Config(format!(
                "configuration file '{}' does not exist.",
                path.display()
            ))));
        }
        return Ok(path);
    }
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    find_config_path_from(&current_dir).ok_or_else(|| {
        anyhow!(ResilientError::Config(format!(
            "no configuration file found from '{}'; set RESILIENT_CONFIG or pass --config.",
            current_dir.display()
        )))
    })
}

fn find_config_path_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        for candidate in CONFIG_CANDIDATES {
            let config = path.join(candidate);
            if config.is_file() {
                return Some(config);
            }
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping configuration search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads and flattens a configuration file into dotted keys.
///
/// Files ending in `.toml` are parsed as TOML, everything else as YAML.
pub fn load_tree(path: &Path) -> Result<BTreeMap<String, String>> {
    info!("Loading configuration from: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

    let mut tree = BTreeMap::new();
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        let table: toml::Table = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
        for (key, value) in &table {
            flatten_toml(key, value, &mut tree);
        }
    } else {
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from file: {}", path.display()))?;
        flatten_yaml("", &value, &mut tree);
    }
    debug!("Loaded {} configuration entries.", tree.len());
    Ok(tree)
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut BTreeMap<String, String>) {
    use serde_yaml::Value;
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_yaml(&join_key(prefix, &index.to_string()), item, out);
            }
        }
        Value::Mapping(map) => {
            for (key, item) in map {
                let key = match key {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        debug!("Skipping non-scalar configuration key: {:?}", other);
                        continue;
                    }
                };
                flatten_yaml(&join_key(prefix, &key), item, out);
            }
        }
        Value::Tagged(tagged) => flatten_yaml(prefix, &tagged.value, out),
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut BTreeMap<String, String>) {
    use toml::Value;
    match value {
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Integer(i) => {
            out.insert(prefix.to_string(), i.to_string());
        }
        Value::Float(f) => {
            out.insert(prefix.to_string(), f.to_string());
        }
        Value::Boolean(b) => {
            out.insert(prefix.to_string(), b.to_string());
        }
        Value::Datetime(dt) => {
            out.insert(prefix.to_string(), dt.to_string());
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_toml(&join_key(prefix, &index.to_string()), item, out);
            }
        }
        Value::Table(table) => {
            for (key, item) in table {
                flatten_toml(&join_key(prefix, key), item, out);
            }
        }
    }
}

/// Validates the resolved configuration before any task is built.
///
/// Every rule is checked and all violations are reported together in a single
/// `ResilientError::Validation`:
/// - `VIRTUAL_HOST` still holds the placeholder host
/// - `project_type` is missing or not a supported project type
/// - `jira_code` still holds the placeholder tracking code
///
/// A missing `VIRTUAL_HOST` or `jira_code` is a lookup failure and is returned
/// as `ResilientError::Config` straight away.
pub fn validate(resolver: &ConfigResolver) -> Result<()> {
    info!("Validating configuration...");
    let mut messages = Vec::new();

    if resolver.get("VIRTUAL_HOST")? == PLACEHOLDER_HOST {
        messages.push(
            "- The VIRTUAL_HOST parameter in the docksal-local.env file has not been modified."
                .to_string(),
        );
    }

    let project_type = resolver.get("project_type").unwrap_or_default();
    if ProjectType::from_key(&project_type).is_none() {
        messages.push(format!(
            "- The project_type parameter is not set or doesn't have a supported site type (found '{}', expected one of: {}).",
            project_type,
            ProjectType::keys().join(", ")
        ));
    }

    if resolver.get("jira_code")? == PLACEHOLDER_TRACKING_CODE {
        messages.push(
            "- The jira_code parameter in the configuration file has not been modified.".to_string(),
        );
    }

    if !messages.is_empty() {
        return Err(anyhow!(ResilientError::Validation(messages)));
    }
    info!("Configuration passed validation!");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tree(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (format!("{}.{}", CONFIG_PREFIX, k), v.to_string()))
            .collect()
    }

    fn env(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_environment_wins_over_tree() {
        let resolver = ConfigResolver::new(
            tree(&[("VIRTUAL_HOST", "from-file.docksal")]),
            env(&[("VIRTUAL_HOST", "from-env.docksal")]),
        );
        assert_eq!(resolver.get("VIRTUAL_HOST").unwrap(), "from-env.docksal");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_environment_is_skipped() {
        use std::os::unix::ffi::OsStringExt;
        let vars = vec![
            (OsString::from("LEGACY_VAR"), OsString::from_vec(b"caf\xe9".to_vec())),
            (OsString::from_vec(b"K\xff".to_vec()), OsString::from("v")),
            (OsString::from("jira_code"), OsString::from("ACME")),
        ];
        let resolver = ConfigResolver::new(BTreeMap::new(), utf8_vars(vars));
        assert_eq!(resolver.get("jira_code").unwrap(), "ACME");
        assert!(!resolver.contains("LEGACY_VAR"));
    }

    #[test]
    fn test_tree_used_when_env_missing_or_empty() {
        let resolver = ConfigResolver::new(
            tree(&[("database.host", "db")]),
            env(&[("database.host", "")]),
        );
        assert_eq!(resolver.get("database.host").unwrap(), "db");
    }

    #[test]
    fn test_unprefixed_tree_key_is_not_visible() {
        let mut raw = BTreeMap::new();
        raw.insert("jira_code".to_string(), "ACME".to_string());
        let resolver = ConfigResolver::new(raw, Vec::new());
        assert!(!resolver.contains("jira_code"));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let resolver = ConfigResolver::new(BTreeMap::new(), Vec::new());
        let err = resolver.get("database.name").unwrap_err();
        match err.downcast_ref::<ResilientError>() {
            Some(ResilientError::Config(msg)) => {
                assert!(msg.contains("command.resilient.database.name"))
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_aggregates_placeholders() {
        let resolver = ConfigResolver::new(
            tree(&[
                ("VIRTUAL_HOST", PLACEHOLDER_HOST),
                ("project_type", "wp"),
                ("jira_code", PLACEHOLDER_TRACKING_CODE),
            ]),
            Vec::new(),
        );
        let err = validate(&resolver).unwrap_err();
        match err.downcast_ref::<ResilientError>() {
            Some(ResilientError::Validation(messages)) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].contains("VIRTUAL_HOST"));
                assert!(messages[1].contains("jira_code"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_unsupported_project_type() {
        let resolver = ConfigResolver::new(
            tree(&[
                ("VIRTUAL_HOST", "acme.docksal"),
                ("project_type", "sf"),
                ("jira_code", "ACME"),
            ]),
            Vec::new(),
        );
        let err = validate(&resolver).unwrap_err();
        assert!(err.to_string().contains("found 'sf'"));
    }

    #[test]
    fn test_validation_passes_for_customized_config() {
        let resolver = ConfigResolver::new(
            tree(&[
                ("VIRTUAL_HOST", "acme.docksal"),
                ("project_type", "drupal8"),
                ("jira_code", "ACME"),
            ]),
            Vec::new(),
        );
        assert!(validate(&resolver).is_ok());
    }

    #[test]
    fn test_load_yaml_tree_flattens_nested_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resilient.yml");
        fs::write(
            &path,
            "command:\n  resilient:\n    project_type: wp\n    database:\n      host: db\n      port: 3306\n    hosts: [a, b]\n",
        )
        .unwrap();

        let tree = load_tree(&path).unwrap();
        assert_eq!(tree["command.resilient.project_type"], "wp");
        assert_eq!(tree["command.resilient.database.host"], "db");
        assert_eq!(tree["command.resilient.database.port"], "3306");
        assert_eq!(tree["command.resilient.hosts.1"], "b");
    }

    #[test]
    fn test_load_toml_tree_flattens_nested_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resilient.toml");
        fs::write(
            &path,
            "[command.resilient]\nproject_type = \"drupal8\"\n\n[command.resilient.database]\nname = \"default\"\n",
        )
        .unwrap();

        let tree = load_tree(&path).unwrap();
        assert_eq!(tree["command.resilient.project_type"], "drupal8");
        assert_eq!(tree["command.resilient.database.name"], "default");
    }

    #[test]
    fn test_load_tree_invalid_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        fs::write(&path, "command: [unclosed").unwrap();
        let result = load_tree(&path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse YAML"));
    }

    #[test]
    fn test_find_config_path_searches_ancestors() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".docksal")).unwrap();
        fs::write(dir.path().join(".docksal/resilient.yml"), "").unwrap();
        let nested = dir.path().join("web/themes");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_path_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(".docksal/resilient.yml"));
    }

    #[test]
    fn test_find_config_path_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("resilient.yml"), "").unwrap();
        let repo = dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        assert!(find_config_path_from(&repo).is_none());
    }

    #[test]
    fn test_resolve_explicit_missing_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        let result = resolve_config_path(Some(missing.to_str().unwrap()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}

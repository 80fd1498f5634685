//! # Resilient Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the provisioning tool.
//! Every failure surfaces to `main.rs` as a non-zero exit with a readable message.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ResilientError`: A custom error enum using `thiserror` for the specific error kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error kinds cover:
//! - Configuration lookups that found nothing (`Config`)
//! - Aggregated configuration validation failures (`Validation`)
//! - Unknown plugin keys (`UnknownPlugin`) and missing plugin capabilities
//! - Task failures during execution (`TaskExecution`)
//! - Filesystem and external command failures raised by individual tasks
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! return Err(anyhow!(ResilientError::UnknownPlugin(key.to_string())));
//!
//! // Check the kind of a propagated error
//! if let Some(ResilientError::Validation(messages)) = err.downcast_ref::<ResilientError>() {
//!     eprintln!("{} problems found", messages.len());
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the provisioning tool.
#[derive(Error, Debug)]
pub enum ResilientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("Unknown plugin '{0}'.")]
    UnknownPlugin(String),

    #[error("Plugin '{plugin}' cannot {capability}.")]
    MissingCapability {
        plugin: String,
        capability: &'static str,
    },

    #[error("Task {position}/{total} failed ({task}): {message}")]
    TaskExecution {
        position: usize,
        total: usize,
        task: String,
        message: String,
    },

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("External command failed: {cmd}, Status: {status}")]
    ExternalCommand { cmd: String, status: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = ResilientError::Config("key 'command.resilient.foo' not found.".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: key 'command.resilient.foo' not found."
        );

        let unknown = ResilientError::UnknownPlugin("sf".into());
        assert_eq!(unknown.to_string(), "Unknown plugin 'sf'.");

        let task_err = ResilientError::TaskExecution {
            position: 2,
            total: 3,
            task: "exec: composer install".into(),
            message: "exit status 1".into(),
        };
        assert_eq!(
            task_err.to_string(),
            "Task 2/3 failed (exec: composer install): exit status 1"
        );
    }

    #[test]
    fn test_validation_error_lists_every_message() {
        let err = ResilientError::Validation(vec!["- first".into(), "- second".into()]);
        let text = err.to_string();
        assert!(text.contains("- first"));
        assert!(text.contains("- second"));
    }
}

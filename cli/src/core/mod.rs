//! # Resilient Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces every command relies on:
//! - `config`: Configuration file loading, key resolution and validation
//! - `context`: The per-invocation `ProjectContext` and `ProjectType`
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::context::ProjectContext;
//! use crate::core::error::{ResilientError, Result};
//! ```
//!
pub mod config;
pub mod context;
pub mod error;

//! Core types, errors, and configuration for the logwatch tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`WatchTarget`]: the single file being tailed and its parent directory
//! - [`LineRecord`]: one numbered line of the watched file
//! - [`HighlightSpan`]: a matched byte range within a line
//! - Configuration structures ([`Config`] and its sections)
//! - [`ConfigError`] for configuration and path validation failures
//! - An `FxHashMap` alias for maps keyed by line number
//!
//! # Crate Dependencies
//!
//! ```text
//! lw-cli ──► lw-tui ──► lw-tail ──► lw-content ──► lw-core
//!                              └──► lw-watcher ───►
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{ColorScheme, Config, FilterConfig, TuiConfig, WatchConfig};
pub use error::ConfigError;
pub use hash::{FxHashMap, fx_hash_map};
pub use types::{HighlightSpan, HighlightSpans, LineHighlights, LineRecord, WatchTarget};

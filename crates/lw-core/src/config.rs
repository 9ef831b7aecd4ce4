//! Configuration structures for the logwatch tool.
//!
//! This module provides configuration types for all components of the application:
//!
//! - [`WatchConfig`] - Change observer settings (enable, event coalescing)
//! - [`FilterConfig`] - Pattern compilation settings (case, size limit)
//! - [`TuiConfig`] - Terminal UI settings (tick rate, colors, status timeout)
//! - [`Config`] - Root configuration combining all settings
//!
//! Nothing here is persisted between sessions. The binary fills these from
//! command-line flags and environment variables, and every type implements
//! [`Default`] so library users can construct them programmatically.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Color scheme for the TUI.
///
/// Controls the visual appearance of the terminal interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ColorScheme {
    /// Automatically detect based on terminal settings.
    #[default]
    Auto,
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
}

/// Configuration for the change observer.
///
/// # Examples
///
/// ```
/// use lw_core::WatchConfig;
///
/// let config = WatchConfig::default();
/// assert!(config.enabled);
/// assert!(config.coalesce_events);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Whether the opened file is watched for changes at all.
    ///
    /// When disabled the view only changes on manual refresh.
    pub enabled: bool,

    /// Whether consecutive queued change events are merged into one refresh.
    pub coalesce_events: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            coalesce_events: true,
        }
    }
}

/// Configuration for pattern compilation.
///
/// # Examples
///
/// ```
/// use lw_core::FilterConfig;
///
/// let config = FilterConfig::default();
/// assert!(!config.case_insensitive);
/// assert_eq!(config.size_limit_bytes, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Match letters regardless of case.
    pub case_insensitive: bool,

    /// Upper bound on the size of a compiled pattern.
    ///
    /// Patterns that would compile to a larger program are rejected as
    /// invalid instead of consuming unbounded memory.
    pub size_limit_bytes: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            size_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Configuration for the terminal user interface.
///
/// # Examples
///
/// ```
/// use lw_core::{ColorScheme, TuiConfig};
///
/// let config = TuiConfig::default();
/// assert_eq!(config.tick_rate_ms, 250);
/// assert_eq!(config.color_scheme, ColorScheme::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds (status expiry, notices).
    pub tick_rate_ms: u64,

    /// Render rate in frames per second.
    pub frame_rate: u32,

    /// Color scheme for the interface.
    pub color_scheme: ColorScheme,

    /// Seconds before an informational status message is hidden.
    pub status_timeout_secs: u64,

    /// Keep the view scrolled to the last line when content grows.
    pub follow_tail: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30,
            color_scheme: ColorScheme::Auto,
            status_timeout_secs: 5,
            follow_tail: true,
        }
    }
}

/// Root configuration for logwatch.
///
/// # Examples
///
/// ```
/// use lw_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Change observer configuration.
    pub watch: WatchConfig,

    /// Pattern compilation configuration.
    pub filter: FilterConfig,

    /// Terminal UI configuration.
    pub tui: TuiConfig,
}

impl Config {
    /// Checks option values that the types alone cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tui.tick_rate_ms == 0 {
            return Err(ConfigError::invalid_option(
                "tick_rate_ms",
                "must be greater than zero",
            ));
        }
        if self.tui.frame_rate == 0 {
            return Err(ConfigError::invalid_option(
                "frame_rate",
                "must be greater than zero",
            ));
        }
        if self.filter.size_limit_bytes == 0 {
            return Err(ConfigError::invalid_option(
                "size_limit_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

//! Error types for the lw-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration and path
//! validation errors that can occur across the workspace.

use camino::Utf8PathBuf;

/// Errors that can occur while validating configuration or resolving paths.
///
/// # Examples
///
/// ```
/// use lw_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::InvalidPath {
///     path: Utf8PathBuf::from("/var/log/"),
///     reason: "path has no file name".to_owned(),
/// };
/// assert!(error.to_string().contains("/var/log/"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The current working directory could not be determined or is not UTF-8.
    #[error("cannot resolve relative path '{path}': {reason}")]
    WorkingDirectory {
        /// The relative path being resolved.
        path: Utf8PathBuf,
        /// Why the working directory was unavailable.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidPath`] error.
    #[must_use]
    pub fn invalid_path(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[must_use]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let error = ConfigError::invalid_path("/var/log/", "path has no file name");
        let msg = error.to_string();
        assert!(msg.contains("/var/log/"));
        assert!(msg.contains("no file name"));
    }

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("tick_rate_ms", "must be positive");
        let msg = error.to_string();
        assert!(msg.contains("tick_rate_ms"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_working_directory_display() {
        let error = ConfigError::WorkingDirectory {
            path: Utf8PathBuf::from("app.log"),
            reason: "not UTF-8".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "cannot resolve relative path 'app.log': not UTF-8"
        );
    }
}

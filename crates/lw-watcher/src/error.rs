//! Error types for the lw-watcher crate.
//!
//! This module provides the [`WatchError`] type for errors that can occur
//! while setting up or operating the change observer.

use camino::Utf8PathBuf;

/// Errors that can occur during change observation.
///
/// # Error Recovery Strategy
///
/// - **Setup failures** ([`WatchError::SetupFailed`], [`WatchError::PathNotFound`],
///   [`WatchError::NotADirectory`]): the observer keeps whatever it was
///   watching before the call
/// - **Non-UTF-8 path** ([`WatchError::NonUtf8Path`]): recoverable, the event
///   is skipped
/// - **Backend errors** ([`WatchError::Notify`], [`WatchError::Io`]): fatal for
///   the call that produced them
///
/// # Examples
///
/// ```
/// use lw_watcher::WatchError;
///
/// fn describe(err: &WatchError) -> &'static str {
///     if err.is_setup_failure() {
///         "could not start watching"
///     } else if err.is_recoverable() {
///         "skipped"
///     } else {
///         "watcher failed"
///     }
/// }
///
/// assert_eq!(describe(&WatchError::path_not_found("/nope")), "could not start watching");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The backend refused to monitor the directory.
    #[error("cannot watch directory {path}: {source}")]
    SetupFailed {
        /// Directory that could not be monitored.
        path: Utf8PathBuf,
        /// Backend error.
        #[source]
        source: notify::Error,
    },

    /// The directory to monitor does not exist.
    #[error("directory does not exist: {0}")]
    PathNotFound(Utf8PathBuf),

    /// The path to monitor exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// `retarget` was called on an observer that is not running.
    #[error("observer is not started")]
    NotStarted,

    /// A path reported by the backend is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The notify backend could not be created.
    #[error("notify watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// An I/O error occurred while validating a path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    /// Creates a new [`WatchError::SetupFailed`] error.
    #[inline]
    pub fn setup_failed(path: impl Into<Utf8PathBuf>, source: notify::Error) -> Self {
        Self::SetupFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`WatchError::PathNotFound`] error.
    #[inline]
    pub fn path_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }

    /// Creates a new [`WatchError::NotADirectory`] error.
    #[inline]
    pub fn not_a_directory(path: impl Into<Utf8PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    /// Creates a new [`WatchError::NonUtf8Path`] error.
    #[inline]
    pub fn non_utf8_path(path: impl Into<std::path::PathBuf>) -> Self {
        Self::NonUtf8Path(path.into())
    }

    /// Returns `true` if this error only affects a single event.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NonUtf8Path(_))
    }

    /// Returns `true` if this error is fatal for the operation.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns `true` if the directory could not be monitored.
    #[inline]
    #[must_use]
    pub const fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            Self::SetupFailed { .. } | Self::PathNotFound(_) | Self::NotADirectory(_)
        )
    }

    /// Returns the directory associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::SetupFailed { path, .. } | Self::PathNotFound(path) | Self::NotADirectory(path) => {
                Some(path)
            }
            Self::NotStarted | Self::NonUtf8Path(_) | Self::Notify(_) | Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_watch_error_path_not_found() {
        let err = WatchError::path_not_found("/var/log/missing");
        assert!(err.is_fatal());
        assert!(err.is_setup_failure());
        assert_eq!(err.path().map(|p| p.as_str()), Some("/var/log/missing"));
        assert_eq!(err.to_string(), "directory does not exist: /var/log/missing");
    }

    #[test]
    fn test_watch_error_not_a_directory() {
        let err = WatchError::not_a_directory("/etc/hosts");
        assert!(err.is_setup_failure());
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_watch_error_setup_failed() {
        let err = WatchError::setup_failed("/root", notify::Error::generic("denied"));
        assert!(err.is_setup_failure());
        assert!(err.to_string().starts_with("cannot watch directory /root"));
    }

    #[test]
    fn test_watch_error_non_utf8() {
        let err = WatchError::non_utf8_path(PathBuf::from("x"));
        assert!(err.is_recoverable());
        assert!(!err.is_setup_failure());
        assert!(err.path().is_none());
    }

    #[test]
    fn test_watch_error_io() {
        let err = WatchError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "no"));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_watch_error_not_started() {
        let err = WatchError::NotStarted;
        assert!(err.is_fatal());
        assert!(!err.is_setup_failure());
    }
}

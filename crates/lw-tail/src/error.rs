//! Error types for the lw-tail crate.

use camino::Utf8PathBuf;
use lw_content::ContentError;
use lw_core::ConfigError;
use lw_watcher::WatchError;

/// Errors raised by tail operations.
///
/// None of these stop the controller. Each is reported to the presenter as an
/// error status and the controller's state is left as it was before the
/// failed call.
#[derive(Debug, thiserror::Error)]
pub enum TailError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    FileAccess {
        /// File that failed to read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The path could not be turned into a watch target.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Decoding or pattern compilation failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The change observer could not be set up.
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// The operation needs an open file.
    #[error("no file is open")]
    NoFileOpen,

    /// The worker loop has exited.
    #[error("tail worker is no longer running")]
    ChannelClosed,
}

impl TailError {
    /// Creates a new [`TailError::FileAccess`] error.
    #[inline]
    pub fn file_access(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the worker can keep processing commands.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::ChannelClosed)
    }

    /// Returns `true` if the worker is gone.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// The message shown to the user.
    #[must_use]
    pub fn status_message(&self) -> String {
        format!("Error: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_file_access_message() {
        let err = TailError::file_access(
            "/var/log/app.log",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert!(err.is_recoverable());
        insta::assert_snapshot!(
            err.status_message(),
            @"Error: cannot read /var/log/app.log: No such file or directory"
        );
    }

    #[test]
    fn test_transparent_watch_error() {
        let err = TailError::from(WatchError::path_not_found("/gone"));
        assert_eq!(err.to_string(), "directory does not exist: /gone");
    }

    #[test]
    fn test_channel_closed_is_fatal() {
        assert!(TailError::ChannelClosed.is_fatal());
        assert!(!TailError::NoFileOpen.is_fatal());
        assert_eq!(TailError::NoFileOpen.status_message(), "Error: no file is open");
    }
}

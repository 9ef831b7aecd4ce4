//! The single file under watch.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Identifies exactly one file being tailed.
///
/// The directory is stored alongside the path because the change observer
/// monitors the directory (the file itself may not exist yet, or may be
/// replaced by an editor's atomic save). A target is never mutated; opening
/// another file builds a new one.
///
/// # Examples
///
/// ```
/// use lw_core::WatchTarget;
///
/// let target = WatchTarget::new("/var/log/app.log", "/var/log");
/// assert_eq!(target.file_name(), "app.log");
/// assert!(target.matches("/var/log/app.log".as_ref()));
/// assert!(!target.matches("/var/log/other.log".as_ref()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchTarget {
    path: Utf8PathBuf,
    directory: Utf8PathBuf,
}

impl WatchTarget {
    /// Creates a target from an already-resolved path and directory.
    ///
    /// No filesystem access is performed. Prefer [`WatchTarget::resolve`] for
    /// user-supplied paths.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            directory: directory.into(),
        }
    }

    /// Resolves a user-supplied path into an absolute target.
    ///
    /// Relative paths are joined onto the current working directory. The
    /// parent directory is canonicalized when it exists so that the path
    /// compares equal to what the OS reports in change notifications (for
    /// example `/private/var` on macOS). The file itself does not need to
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if the path has no file name
    /// component, or [`ConfigError::WorkingDirectory`] if a relative path
    /// cannot be made absolute.
    pub fn resolve(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ConfigError::invalid_path(path, "path has no file name"))?;

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            current_dir(path)?.join(path)
        };

        let parent = absolute
            .parent()
            .map(Utf8Path::to_path_buf)
            .ok_or_else(|| ConfigError::invalid_path(path, "path has no parent directory"))?;
        let directory = parent.canonicalize_utf8().unwrap_or(parent);

        Ok(Self {
            path: directory.join(file_name),
            directory,
        })
    }

    /// Returns the absolute path of the watched file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the directory the observer monitors.
    #[inline]
    #[must_use]
    pub fn directory(&self) -> &Utf8Path {
        &self.directory
    }

    /// Returns the file name without the directory.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }

    /// Returns `true` if `candidate` names this target's file.
    #[inline]
    #[must_use]
    pub fn matches(&self, candidate: &Utf8Path) -> bool {
        candidate == self.path
    }
}

fn current_dir(path: &Utf8Path) -> Result<Utf8PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::WorkingDirectory {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Utf8PathBuf::try_from(cwd).map_err(|_| ConfigError::WorkingDirectory {
        path: path.to_path_buf(),
        reason: "working directory is not valid UTF-8".to_owned(),
    })
}

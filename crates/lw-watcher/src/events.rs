//! Change notifications emitted by the observer.

use camino::Utf8PathBuf;

/// "The watched file may have changed."
///
/// Carries only the path. The consumer decides what to re-read.
///
/// # Examples
///
/// ```
/// use lw_watcher::ChangeEvent;
/// use camino::Utf8PathBuf;
///
/// let event = ChangeEvent::new(Utf8PathBuf::from("/var/log/app.log"));
/// assert_eq!(event.file_name(), Some("app.log"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Absolute path of the watched file.
    pub path: Utf8PathBuf,
}

impl ChangeEvent {
    /// Creates an event for `path`.
    #[inline]
    #[must_use]
    pub const fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    /// The file name component of the path.
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }
}

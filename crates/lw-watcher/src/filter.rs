//! Event filtering for the change observer.
//!
//! The backend reports every change in the monitored directory. Two checks run
//! on the notification thread before anything is published:
//!
//! - [`is_change_kind`]: only modifications and creations count as changes
//! - [`FileFilter`]: only the watched file's path passes
//!
//! # Examples
//!
//! ```
//! use lw_watcher::{FileFilter, TargetFilter};
//! use lw_core::WatchTarget;
//! use camino::Utf8Path;
//!
//! let filter = TargetFilter::new(WatchTarget::new("/var/log/app.log", "/var/log"));
//!
//! assert!(filter.should_process(Utf8Path::new("/var/log/app.log")));
//! assert!(!filter.should_process(Utf8Path::new("/var/log/app.log.1")));
//! ```

use camino::Utf8Path;
use lw_core::WatchTarget;
use notify::EventKind;

/// A predicate deciding which changed paths are forwarded.
///
/// Filters run on the backend's notification thread, so they must be
/// [`Send`] and [`Sync`].
pub trait FileFilter: Send + Sync + 'static {
    /// Returns `true` if a change to `path` should be forwarded.
    fn should_process(&self, path: &Utf8Path) -> bool;
}

/// Accepts exactly the watched file's path, or nothing once cleared.
#[derive(Debug, Clone, Default)]
pub struct TargetFilter {
    target: Option<WatchTarget>,
}

impl TargetFilter {
    /// Creates a filter for `target`.
    #[must_use]
    pub const fn new(target: WatchTarget) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// A filter that rejects everything.
    #[must_use]
    pub const fn cleared() -> Self {
        Self { target: None }
    }

    /// The target this filter accepts.
    #[must_use]
    pub const fn target(&self) -> Option<&WatchTarget> {
        self.target.as_ref()
    }
}

impl FileFilter for TargetFilter {
    #[inline]
    fn should_process(&self, path: &Utf8Path) -> bool {
        self.target.as_ref().is_some_and(|target| target.matches(path))
    }
}

/// Returns `true` for event kinds that mean the file's content may differ.
///
/// Creation is included so a file that appears after it was opened is
/// picked up. Access and removal events are ignored.
#[inline]
#[must_use]
pub const fn is_change_kind(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Modify(_) | EventKind::Create(_))
}

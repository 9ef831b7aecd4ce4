//! The change observer.
//!
//! [`ChangeObserver`] wraps a notify [`RecommendedWatcher`] on the watched
//! file's directory. The backend calls back on its own thread; the observer
//! filters there and hands matching events to a caller-supplied function,
//! which is expected to enqueue and return immediately.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │            notify backend thread                     │
//! │  ┌───────────────────┐    ┌───────────────────────┐  │
//! │  │ RecommendedWatcher│ -> │ kind + target filter  │  │
//! │  │ (non-recursive)   │    │ (read lock)           │  │
//! │  └───────────────────┘    └──────────┬────────────┘  │
//! └──────────────────────────────────────│───────────────┘
//!                                        │ on_change(ChangeEvent)
//!                                        ▼
//!                              Publisher::publish (never blocks)
//! ```
//!
//! The target filter sits behind a `parking_lot` read-write lock. The
//! callback holds the read lock while it forwards an event, and `retarget`
//! swaps the filter under the write lock, so once `retarget` returns no
//! event for the previous file can be forwarded.
//!
//! # Usage
//!
//! ```no_run
//! use lw_watcher::{ChangeObserver, EventQueue};
//! use lw_core::WatchTarget;
//! use camino::Utf8Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let target = WatchTarget::resolve(Utf8Path::new("/var/log/syslog"))?;
//! let (publisher, mut queue) = EventQueue::channel();
//!
//! let mut observer = ChangeObserver::new();
//! observer.start(target, move |event| {
//!     publisher.publish(event);
//! })?;
//!
//! while let Some(event) = queue.blocking_recv() {
//!     println!("changed: {}", event.path);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use lw_core::WatchTarget;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use tracing::{debug, info, trace, warn};

use crate::error::WatchError;
use crate::events::ChangeEvent;
use crate::filter::{FileFilter, TargetFilter, is_change_kind};

/// Monitors one file by watching its directory.
pub struct ChangeObserver {
    /// The backend watcher, present while started.
    watcher: Option<RecommendedWatcher>,

    /// Filter shared with the backend callback.
    filter: Arc<RwLock<TargetFilter>>,
}

impl std::fmt::Debug for ChangeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeObserver")
            .field("target", &self.target())
            .field("is_started", &self.is_started())
            .finish_non_exhaustive()
    }
}

impl Default for ChangeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeObserver {
    /// Creates a stopped observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            watcher: None,
            filter: Arc::new(RwLock::new(TargetFilter::cleared())),
        }
    }

    /// Starts monitoring `target`, forwarding each matching change to
    /// `on_change`.
    ///
    /// The target file itself does not need to exist. If the observer is
    /// already running, the previous watch is replaced only after the new
    /// one is in place.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::PathNotFound`] or [`WatchError::NotADirectory`]
    /// if the directory is unusable, [`WatchError::Notify`] if the backend
    /// cannot be created, and [`WatchError::SetupFailed`] if it refuses the
    /// directory. The observer is left as it was on error.
    pub fn start<F>(&mut self, target: WatchTarget, on_change: F) -> Result<(), WatchError>
    where
        F: Fn(ChangeEvent) + Send + Sync + 'static,
    {
        validate_directory(target.directory())?;

        let filter = Arc::new(RwLock::new(TargetFilter::new(target.clone())));
        let callback_filter = Arc::clone(&filter);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            handle_event(res, &callback_filter, &on_change);
        })?;
        watcher
            .watch(target.directory().as_std_path(), RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::setup_failed(target.directory(), source))?;

        self.stop();
        self.filter = filter;
        self.watcher = Some(watcher);

        info!(path = %target.path(), directory = %target.directory(), "Change observer started");
        Ok(())
    }

    /// Stops monitoring. Safe to call repeatedly or before [`start`](Self::start).
    pub fn stop(&mut self) {
        // Clear first so an in-flight callback cannot forward after we return.
        let previous = std::mem::take(&mut *self.filter.write());
        if let Some(watcher) = self.watcher.take() {
            drop(watcher);
            if let Some(target) = previous.target() {
                info!(path = %target.path(), "Change observer stopped");
            }
        }
    }

    /// Switches to a new target while staying started.
    ///
    /// When the directory differs, the new directory is watched before the
    /// old one is released.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::NotStarted`] on a stopped observer, or a setup
    /// error if the new directory cannot be monitored. On error the previous
    /// target stays in effect.
    pub fn retarget(&mut self, target: WatchTarget) -> Result<(), WatchError> {
        let watcher = self.watcher.as_mut().ok_or(WatchError::NotStarted)?;
        validate_directory(target.directory())?;

        let old_directory: Option<Utf8PathBuf> = self
            .filter
            .read()
            .target()
            .map(|old| old.directory().to_owned());
        let directory_changed = old_directory.as_deref() != Some(target.directory());

        // The backend may need its callback thread to service watch calls, so
        // no lock is held across them.
        if directory_changed {
            watcher
                .watch(target.directory().as_std_path(), RecursiveMode::NonRecursive)
                .map_err(|source| WatchError::setup_failed(target.directory(), source))?;
        }

        *self.filter.write() = TargetFilter::new(target.clone());

        if directory_changed {
            if let Some(old) = old_directory {
                if let Err(err) = watcher.unwatch(old.as_std_path()) {
                    warn!(directory = %old, error = %err, "Failed to release previous directory");
                }
            }
        }

        info!(path = %target.path(), "Change observer retargeted");
        Ok(())
    }

    /// The current target, if started.
    #[must_use]
    pub fn target(&self) -> Option<WatchTarget> {
        self.filter.read().target().cloned()
    }

    /// Returns `true` while monitoring.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.watcher.is_some()
    }
}

impl Drop for ChangeObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Checks that `directory` exists and is a directory.
fn validate_directory(directory: &Utf8Path) -> Result<(), WatchError> {
    match directory.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(WatchError::not_a_directory(directory)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(WatchError::path_not_found(directory))
        }
        Err(err) => Err(WatchError::Io(err)),
    }
}

/// Backend callback body: filters by kind and path, then forwards.
fn handle_event<F>(res: notify::Result<Event>, filter: &RwLock<TargetFilter>, on_change: &F)
where
    F: Fn(ChangeEvent),
{
    let event = match res {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "Notify backend error");
            return;
        }
    };

    if !is_change_kind(&event.kind) {
        trace!(kind = ?event.kind, "Ignoring non-change event");
        return;
    }

    for path in event.paths {
        let path = match Utf8PathBuf::try_from(path) {
            Ok(p) => p,
            Err(e) => {
                let err = WatchError::non_utf8_path(e.into_path_buf());
                trace!(error = %err, "Skipping event");
                continue;
            }
        };

        let guard = filter.read();
        if guard.should_process(&path) {
            debug!(path = %path, kind = ?event.kind, "Forwarding change event");
            on_change(ChangeEvent::new(path));
        } else {
            trace!(path = %path, "Filtered out change event");
        }
    }
}

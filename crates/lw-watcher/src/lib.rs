//! Single-file change observer and event queue for logwatch.
//!
//! This crate detects changes to one watched file via the `notify` crate and
//! moves them off the backend's thread through an in-order queue.
//!
//! # Overview
//!
//! - [`ChangeObserver`]: watches the file's directory non-recursively and
//!   forwards modifications to exactly that file. No debouncing happens here;
//!   coalescing is the consumer's decision.
//! - [`EventQueue`] / [`Publisher`]: unbounded, in-order, never blocks the
//!   publisher.
//! - [`FileFilter`]: the path predicate applied on the backend thread.
//!
//! # Crate Dependencies
//!
//! ```text
//! lw-cli ──► lw-tui ──► lw-tail ──► lw-content ──► lw-core
//!                              └──► lw-watcher ───►
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use lw_watcher::{ChangeObserver, EventQueue};
//! use lw_core::WatchTarget;
//! use camino::Utf8Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let target = WatchTarget::resolve(Utf8Path::new("./app.log"))?;
//!     let (publisher, mut queue) = EventQueue::channel();
//!
//!     let mut observer = ChangeObserver::new();
//!     observer.start(target, move |event| {
//!         publisher.publish(event);
//!     })?;
//!
//!     while let Some(event) = queue.recv().await {
//!         println!("File changed: {}", event.path);
//!     }
//!     Ok(())
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod filter;
pub mod observer;
pub mod queue;

pub use error::WatchError;
pub use events::ChangeEvent;
pub use filter::{FileFilter, TargetFilter, is_change_kind};
pub use observer::ChangeObserver;
pub use queue::{EventQueue, Publisher, TryRecvError};

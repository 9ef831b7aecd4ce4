//! Tail controller and worker loop for logwatch.
//!
//! This crate ties the pieces together: it reads the watched file, keeps the
//! numbered lines and the active filter, reacts to change events, and
//! publishes what should be shown through the [`Presenter`] contract.
//!
//! # Overview
//!
//! - [`TailController`]: the synchronous state machine
//!   (`Idle`, `Watching`, `WatchingFiltered`)
//! - [`TailService`]: a worker that feeds the controller from one ordered
//!   command queue, merging back-to-back change events
//! - [`TailHandle`]: the front end's way to send commands
//! - [`ChannelPresenter`]: forwards presenter callbacks to an async consumer
//!
//! # Example
//!
//! ```no_run
//! use lw_core::Config;
//! use lw_tail::{ChannelPresenter, TailService, TailUpdate};
//!
//! # async fn example() -> Result<(), lw_tail::TailError> {
//! let (presenter, mut updates) = ChannelPresenter::channel();
//! let (handle, service) = TailService::new(&Config::default(), presenter);
//! let worker = service.spawn();
//!
//! handle.open_file("/var/log/syslog")?;
//! handle.set_filter("error")?;
//!
//! while let Some(update) = updates.recv().await {
//!     if let TailUpdate::NewMatch(line) = update {
//!         println!("{:>6} {}", line.number, line.text);
//!     }
//! }
//! handle.shutdown();
//! let _ = worker.await;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod controller;
mod error;
mod presenter;
mod service;
mod state;

pub use controller::{ChangeSink, RefreshCause, RefreshTicket, TailController};
pub use error::TailError;
pub use presenter::{ChannelPresenter, ContentUpdate, Presenter, StatusLevel, TailUpdate};
pub use service::{Command, TailHandle, TailService};
pub use state::TailState;

pub use lw_watcher::EventQueue;

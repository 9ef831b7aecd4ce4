//! The worker loop that drives a [`TailController`].
//!
//! User commands and change events share one queue, so they are applied
//! strictly one at a time in the order they were submitted.
//!
//! ```text
//! ┌────────────┐  publish(FileChanged)  ┌─────────────────────┐
//! │ observer   │ ─────────────────────► │                     │
//! └────────────┘                        │  EventQueue<Command>│ ──► worker (spawn_blocking)
//! ┌────────────┐  TailHandle::open...   │                     │       │
//! │ front end  │ ─────────────────────► │                     │       ▼
//! └────────────┘                        └─────────────────────┘   TailController ──► Presenter
//! ```
//!
//! When several change events are queued back to back, the worker applies
//! the last one only. A non-change command found while draining is applied
//! right after.

use std::collections::VecDeque;
use std::sync::Arc;

use camino::Utf8PathBuf;
use lw_core::Config;
use lw_watcher::{ChangeEvent, EventQueue, Publisher};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::controller::{ChangeSink, TailController};
use crate::error::TailError;
use crate::presenter::Presenter;

/// Work items processed by the worker loop.
#[derive(Debug, Clone)]
pub enum Command {
    /// Open a file, replacing any open one.
    OpenFile(Utf8PathBuf),
    /// Install a filter pattern.
    SetFilter(String),
    /// The result of a file chooser. `None` means nothing was chosen.
    ChooseFile(Option<Utf8PathBuf>),
    /// The result of a pattern prompt. Cancelled or empty input is ignored.
    SubmitPattern(Option<String>),
    /// Drop the filter.
    ClearFilter,
    /// Re-read the file.
    Refresh,
    /// Close the file.
    Close,
    /// The observer saw the file change.
    FileChanged(ChangeEvent),
    /// Stop the worker.
    Shutdown,
}

/// Sends commands to a running [`TailService`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TailHandle {
    publisher: Publisher<Command>,
}

impl TailHandle {
    /// Queues `command`.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::ChannelClosed`] if the worker has exited.
    pub fn send(&self, command: Command) -> Result<(), TailError> {
        if self.publisher.publish(command) {
            Ok(())
        } else {
            Err(TailError::ChannelClosed)
        }
    }

    /// Queues [`Command::OpenFile`].
    ///
    /// # Errors
    ///
    /// Returns [`TailError::ChannelClosed`] if the worker has exited.
    pub fn open_file(&self, path: impl Into<Utf8PathBuf>) -> Result<(), TailError> {
        self.send(Command::OpenFile(path.into()))
    }

    /// Queues [`Command::SetFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`TailError::ChannelClosed`] if the worker has exited.
    pub fn set_filter(&self, raw: impl Into<String>) -> Result<(), TailError> {
        self.send(Command::SetFilter(raw.into()))
    }

    /// Queues [`Command::ClearFilter`].
    ///
    /// # Errors
    ///
    /// Returns [`TailError::ChannelClosed`] if the worker has exited.
    pub fn clear_filter(&self) -> Result<(), TailError> {
        self.send(Command::ClearFilter)
    }

    /// Queues [`Command::Refresh`].
    ///
    /// # Errors
    ///
    /// Returns [`TailError::ChannelClosed`] if the worker has exited.
    pub fn refresh(&self) -> Result<(), TailError> {
        self.send(Command::Refresh)
    }

    /// Queues [`Command::Close`].
    ///
    /// # Errors
    ///
    /// Returns [`TailError::ChannelClosed`] if the worker has exited.
    pub fn close(&self) -> Result<(), TailError> {
        self.send(Command::Close)
    }

    /// Asks the worker to stop. Does nothing if it already has.
    pub fn shutdown(&self) {
        let _ = self.publisher.publish(Command::Shutdown);
    }
}

/// Owns a controller and feeds it from the command queue.
pub struct TailService<P> {
    controller: TailController<P>,
    queue: EventQueue<Command>,
    pending: VecDeque<Command>,
    coalesce: bool,
}

impl<P> std::fmt::Debug for TailService<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailService")
            .field("controller", &self.controller)
            .field("pending", &self.pending.len())
            .field("coalesce", &self.coalesce)
            .finish_non_exhaustive()
    }
}

impl<P: Presenter> TailService<P> {
    /// Creates a service and a handle for sending it commands.
    ///
    /// The observer publishes [`Command::FileChanged`] onto the same queue the
    /// handle uses.
    pub fn new(config: &Config, presenter: P) -> (TailHandle, Self) {
        let (publisher, queue) = EventQueue::channel();
        let observer_publisher = publisher.clone();
        let sink: ChangeSink = Arc::new(move |event| {
            observer_publisher.publish(Command::FileChanged(event));
        });
        let service = Self {
            controller: TailController::new(config, presenter, Some(sink)),
            queue,
            pending: VecDeque::new(),
            coalesce: config.watch.coalesce_events,
        };
        (TailHandle { publisher }, service)
    }

    /// The controller driven by this service.
    pub const fn controller(&self) -> &TailController<P> {
        &self.controller
    }

    /// Runs the worker on tokio's blocking pool.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || self.run())
    }

    /// Processes commands until [`Command::Shutdown`] arrives.
    ///
    /// The observer keeps a publisher alive, so dropping every
    /// [`TailHandle`] does not end the loop; send a shutdown.
    ///
    /// Blocks the calling thread. Must not be called from inside an async
    /// context; use [`spawn`](Self::spawn) there.
    pub fn run(mut self) {
        info!("Tail worker started");
        while let Some(command) = self.next_command() {
            if !self.dispatch(command) {
                break;
            }
        }
        self.controller.close();
        info!("Tail worker stopped");
    }

    fn next_command(&mut self) -> Option<Command> {
        self.pending
            .pop_front()
            .or_else(|| self.queue.blocking_recv())
    }

    /// Applies one command. Returns `false` on shutdown.
    fn dispatch(&mut self, command: Command) -> bool {
        // Errors have already been reported to the presenter.
        let _ = match command {
            Command::OpenFile(path) => self.controller.open_file(&path),
            Command::SetFilter(raw) => self.controller.set_filter(&raw),
            Command::ChooseFile(choice) => self.controller.submit_chosen_file(choice.as_deref()),
            Command::SubmitPattern(input) => self.controller.submit_pattern_input(input.as_deref()),
            Command::ClearFilter => {
                self.controller.clear_filter();
                Ok(())
            }
            Command::Refresh => self.controller.manual_refresh(),
            Command::Close => {
                self.controller.close();
                Ok(())
            }
            Command::FileChanged(event) => {
                let event = self.coalesce_changes(event);
                self.controller.on_change_event(&event)
            }
            Command::Shutdown => return false,
        };
        true
    }

    /// Drains change events queued right behind `first` and returns the last.
    fn coalesce_changes(&mut self, first: ChangeEvent) -> ChangeEvent {
        if !self.coalesce || !self.pending.is_empty() {
            return first;
        }
        let mut latest = first;
        let mut merged = 0_usize;
        while let Ok(command) = self.queue.try_recv() {
            match command {
                Command::FileChanged(event) => {
                    latest = event;
                    merged += 1;
                }
                other => {
                    self.pending.push_back(other);
                    break;
                }
            }
        }
        if merged > 0 {
            debug!(merged, "Coalesced change events");
        }
        latest
    }
}

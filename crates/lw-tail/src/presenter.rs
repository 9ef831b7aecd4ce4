//! The contract between the controller and whatever displays its output.

use lw_content::VisibleLineSet;
use lw_core::{LineHighlights, LineRecord, WatchTarget};
use lw_watcher::{EventQueue, Publisher};

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// An operation failed.
    Error,
}

/// One published snapshot of what should be on screen.
#[derive(Debug, Clone, Default)]
pub struct ContentUpdate {
    /// The open file, or `None` after close.
    pub target: Option<WatchTarget>,

    /// Visible records in order, with their original line numbers.
    pub lines: VisibleLineSet,

    /// Match spans keyed by line number. Empty when no filter is active.
    pub highlights: LineHighlights,

    /// Text of the active pattern, if any.
    pub pattern: Option<String>,
}

impl ContentUpdate {
    /// Returns `true` for the update published on close.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.target.is_none()
    }
}

/// Receives the controller's output.
///
/// Implementations are called from the worker thread and should hand data
/// off rather than render inline.
pub trait Presenter: Send + 'static {
    /// Called after every successful refresh, filter change, and close.
    fn on_content_updated(&mut self, update: &ContentUpdate);

    /// Called with informational or error text.
    fn on_status(&mut self, level: StatusLevel, message: &str);

    /// Called when a change to the file brings in a new last matching line
    /// while a filter is active.
    fn on_new_match(&mut self, line: &LineRecord);
}

/// Everything a [`ChannelPresenter`] forwards.
#[derive(Debug, Clone)]
pub enum TailUpdate {
    /// See [`Presenter::on_content_updated`].
    Content(ContentUpdate),
    /// See [`Presenter::on_status`].
    Status(StatusLevel, String),
    /// See [`Presenter::on_new_match`].
    NewMatch(LineRecord),
}

/// A presenter that forwards every callback onto an [`EventQueue`].
///
/// This is how the async front ends receive updates from the worker thread.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    publisher: Publisher<TailUpdate>,
}

impl ChannelPresenter {
    /// Creates a presenter and the queue it feeds.
    #[must_use]
    pub fn channel() -> (Self, EventQueue<TailUpdate>) {
        let (publisher, queue) = EventQueue::channel();
        (Self { publisher }, queue)
    }

    fn send(&self, update: TailUpdate) {
        if !self.publisher.publish(update) {
            tracing::trace!("Update receiver dropped");
        }
    }
}

impl Presenter for ChannelPresenter {
    fn on_content_updated(&mut self, update: &ContentUpdate) {
        self.send(TailUpdate::Content(update.clone()));
    }

    fn on_status(&mut self, level: StatusLevel, message: &str) {
        self.send(TailUpdate::Status(level, message.to_owned()));
    }

    fn on_new_match(&mut self, line: &LineRecord) {
        self.send(TailUpdate::NewMatch(line.clone()));
    }
}

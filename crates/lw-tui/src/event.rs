//! Event types for the TUI event loop.
//!
//! # Event Sources
//!
//! - **Terminal**: key presses, pastes, mouse wheel, window resizing
//! - **Tail worker**: content updates, status text, new-match notices
//! - **Timer**: periodic ticks (status expiry) and render requests

use crossterm::event::{KeyEvent, MouseEvent};
use lw_tail::TailUpdate;

/// Everything the main loop reacts to.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A key press event from the terminal.
    Key(KeyEvent),

    /// A mouse event from the terminal.
    Mouse(MouseEvent),

    /// Terminal window was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Text pasted into the terminal.
    Paste(String),

    /// Output from the tail worker.
    Tail(TailUpdate),

    /// Periodic tick.
    Tick,

    /// Signal to render a new frame.
    Render,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,
}

impl Event {
    /// Returns `true` if this is a key event.
    #[inline]
    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Returns `true` if this came from the tail worker.
    #[inline]
    #[must_use]
    pub const fn is_tail(&self) -> bool {
        matches!(self, Self::Tail(_))
    }

    /// Returns `true` if this is a tick event.
    #[inline]
    #[must_use]
    pub const fn is_tick(&self) -> bool {
        matches!(self, Self::Tick)
    }

    /// Returns the key event if this is a Key variant.
    #[inline]
    #[must_use]
    pub const fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}

//! Controller lifecycle states.

use std::fmt;

/// Where the controller is in its lifecycle.
///
/// ```text
///            open_file                set_filter
///   Idle ─────────────► Watching ─────────────────► WatchingFiltered
///    ▲                   ▲    ▲                         │    │
///    │       close       │    └──── clear_filter ───────┘    │
///    └───────────────────┴──── open_file / close ────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TailState {
    /// No file is open.
    #[default]
    Idle,

    /// A file is open and every line is shown.
    Watching,

    /// A file is open and only matching lines are shown.
    WatchingFiltered,
}

impl TailState {
    /// Returns `true` when a file is open.
    #[inline]
    #[must_use]
    pub const fn is_watching(self) -> bool {
        matches!(self, Self::Watching | Self::WatchingFiltered)
    }

    /// Returns `true` when a filter is active.
    #[inline]
    #[must_use]
    pub const fn is_filtered(self) -> bool {
        matches!(self, Self::WatchingFiltered)
    }

    /// Short label for status displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Watching => "watching",
            Self::WatchingFiltered => "filtered",
        }
    }
}

impl fmt::Display for TailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(!TailState::Idle.is_watching());
        assert!(TailState::Watching.is_watching());
        assert!(TailState::WatchingFiltered.is_watching());
        assert!(TailState::WatchingFiltered.is_filtered());
        assert!(!TailState::Watching.is_filtered());
    }

    #[test]
    fn test_state_default_and_display() {
        assert_eq!(TailState::default(), TailState::Idle);
        assert_eq!(TailState::WatchingFiltered.to_string(), "filtered");
    }
}

//! User actions for the TUI.
//!
//! ```text
//! Key/Mouse Event → App::handle_key → Action → App::update → tail Command
//! ```

/// User-initiated actions in the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    // =========================================================================
    // Scrolling
    // =========================================================================
    /// Move the cursor one line down.
    ScrollDown,

    /// Move the cursor one line up.
    ScrollUp,

    /// Jump to the first line.
    ScrollTop,

    /// Jump to the last line and resume following.
    ScrollBottom,

    /// Move down by one page.
    PageDown,

    /// Move up by one page.
    PageUp,

    /// Toggle follow-tail.
    ToggleFollow,

    // =========================================================================
    // Prompts
    // =========================================================================
    /// Open the "open log" path prompt.
    EnterOpenPrompt,

    /// Open the "watch for" pattern prompt.
    EnterPatternPrompt,

    /// Dismiss a prompt without submitting.
    CancelPrompt,

    /// Submit the open-log prompt.
    SubmitPath(String),

    /// Submit the pattern prompt.
    SubmitPattern(String),

    // =========================================================================
    // Tail commands
    // =========================================================================
    /// Drop the active filter.
    ClearFilter,

    /// Re-read the file.
    Refresh,

    /// Close the file.
    CloseFile,

    // =========================================================================
    // UI State
    // =========================================================================
    /// Toggle the help panel.
    ToggleHelp,

    /// Hide the help panel.
    HideHelp,

    /// Clear the status message.
    ClearStatus,

    // =========================================================================
    // Application Control
    // =========================================================================
    /// Ask for quit confirmation.
    RequestQuit,

    /// Quit after confirmation.
    ConfirmQuit,

    /// Dismiss the quit confirmation.
    CancelQuit,

    /// Render the UI.
    Render,

    /// No operation.
    #[default]
    None,
}

impl Action {
    /// Returns `true` if this action requires a re-render.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_needs_render() {
        assert!(Action::ScrollDown.needs_render());
        assert!(Action::ToggleHelp.needs_render());
        assert!(!Action::None.needs_render());
    }

    #[test]
    fn test_action_default() {
        assert_eq!(Action::default(), Action::None);
    }
}

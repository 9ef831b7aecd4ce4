//! Application state and input handling.
//!
//! # Architecture
//!
//! ```text
//! App
//!  ├── mode: AppMode             # Normal, prompts, help, quit confirmation
//!  ├── view: LogViewState        # Cursor, scroll offset, follow-tail
//!  ├── content: ContentUpdate    # Last snapshot from the tail worker
//!  ├── input: String             # Prompt buffer
//!  ├── status: Option<StatusMessage>
//!  └── notice: Option<StatusMessage>   # New-match notice
//! ```
//!
//! The app never talks to the tail worker directly. [`App::update`] returns
//! the [`Command`] an action implies and the event loop sends it.

use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use lw_core::TuiConfig;
use lw_tail::{Command, ContentUpdate, StatusLevel, TailUpdate};
use ratatui::layout::Rect;
use tracing::debug;

use crate::action::Action;

/// The current mode of the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Viewing the log.
    #[default]
    Normal,

    /// Typing a path to open.
    OpenPrompt,

    /// Typing a pattern to watch for.
    PatternPrompt,

    /// Help panel is displayed.
    Help,

    /// Waiting for the user to confirm quitting.
    ConfirmQuit,
}

impl AppMode {
    /// Returns `true` while a text prompt has the keyboard.
    #[must_use]
    pub const fn is_prompt(self) -> bool {
        matches!(self, Self::OpenPrompt | Self::PatternPrompt)
    }
}

/// Cursor and scroll state for the log view.
#[derive(Debug, Clone, Default)]
pub struct LogViewState {
    /// Cursor position among visible lines.
    pub selected: Option<usize>,

    /// First visible row.
    pub scroll_offset: usize,

    /// Number of rows that fit on screen, set during render.
    pub visible_height: usize,

    /// Keep the cursor on the last line as content arrives.
    pub follow: bool,
}

impl LogViewState {
    /// Creates a view state.
    #[must_use]
    pub fn new(follow: bool) -> Self {
        Self {
            follow,
            ..Self::default()
        }
    }

    /// Adjusts to a new line count after a content update.
    pub fn sync(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            self.scroll_offset = 0;
        } else if self.follow || self.selected.is_none() {
            self.selected = Some(if self.follow { len - 1 } else { 0 });
        } else {
            self.selected = self.selected.map(|i| i.min(len - 1));
        }
        self.ensure_visible();
    }

    /// Moves the cursor down one line.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1).min(len - 1));
        self.selected = Some(next);
        self.follow = next == len - 1 && self.follow;
        self.ensure_visible();
    }

    /// Moves the cursor up one line and stops following.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
        self.follow = false;
        self.ensure_visible();
    }

    /// Jumps to the first line and stops following.
    pub fn select_first(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(0);
        self.scroll_offset = 0;
        self.follow = false;
    }

    /// Jumps to the last line and resumes following.
    pub fn select_last(&mut self, len: usize) {
        self.follow = true;
        if len == 0 {
            return;
        }
        self.selected = Some(len - 1);
        self.ensure_visible();
    }

    /// Moves down by one page.
    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let page = self.visible_height.max(1);
        self.selected = Some(self.selected.map_or(0, |i| (i + page).min(len - 1)));
        self.ensure_visible();
    }

    /// Moves up by one page and stops following.
    pub fn page_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let page = self.visible_height.max(1);
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page)));
        self.follow = false;
        self.ensure_visible();
    }

    /// Scrolls so the cursor is on screen.
    pub fn ensure_visible(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let height = self.visible_height.max(1);
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + height {
            self.scroll_offset = selected + 1 - height;
        }
    }
}

/// Status message to display in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text.
    pub text: String,

    /// When the message was created.
    pub timestamp: Instant,

    /// Whether this is an error message.
    pub is_error: bool,
}

impl StatusMessage {
    /// Creates a new info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: false,
        }
    }

    /// Creates a new error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: true,
        }
    }

    /// Returns `true` once the message is older than `timeout`.
    #[must_use]
    pub fn should_hide(&self, timeout: Duration) -> bool {
        self.timestamp.elapsed() > timeout
    }
}

/// The main application state.
#[derive(Debug)]
pub struct App {
    /// UI configuration.
    pub config: TuiConfig,

    /// Current UI mode.
    pub mode: AppMode,

    /// Log view state.
    pub view: LogViewState,

    /// Last snapshot published by the tail worker.
    pub content: ContentUpdate,

    /// Prompt buffer.
    pub input: String,

    /// Status message to display.
    pub status: Option<StatusMessage>,

    /// Transient new-match notice.
    pub notice: Option<StatusMessage>,

    /// Whether the application should quit.
    pub should_quit: bool,

    /// Terminal size (updated on resize).
    pub terminal_size: Rect,
}

impl App {
    /// Creates an app with nothing open.
    #[must_use]
    pub fn new(config: TuiConfig) -> Self {
        Self {
            view: LogViewState::new(config.follow_tail),
            config,
            mode: AppMode::Normal,
            content: ContentUpdate::default(),
            input: String::new(),
            status: Some(StatusMessage::info("Press o to open a log, ? for help")),
            notice: None,
            should_quit: false,
            terminal_size: Rect::default(),
        }
    }

    /// Number of lines currently shown.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.content.lines.len()
    }

    /// Returns `true` when a pattern is active.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.content.pattern.is_some()
    }

    /// Handles a key event and returns the resulting action.
    #[must_use]
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'q') if self.mode == AppMode::ConfirmQuit => {
                    Action::ConfirmQuit
                }
                KeyCode::Char('c' | 'q') => Action::RequestQuit,
                KeyCode::Char('o') if !self.mode.is_prompt() => Action::EnterOpenPrompt,
                KeyCode::Char('w') if !self.mode.is_prompt() => Action::EnterPatternPrompt,
                _ => Action::None,
            };
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::OpenPrompt | AppMode::PatternPrompt => self.handle_prompt_key(key),
            AppMode::Help => Self::handle_help_key(key),
            AppMode::ConfirmQuit => Self::handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::RequestQuit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('o') => Action::EnterOpenPrompt,
            KeyCode::Char('/' | 'w') => Action::EnterPatternPrompt,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('c') => Action::CloseFile,
            KeyCode::Char('f') => Action::ToggleFollow,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::ScrollTop,
            KeyCode::Char('G') | KeyCode::End => Action::ScrollBottom,
            KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Esc if self.is_filtered() => Action::ClearFilter,
            KeyCode::Esc => Action::ClearStatus,
            _ => Action::None,
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::CancelPrompt,
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input);
                if self.mode == AppMode::OpenPrompt {
                    Action::SubmitPath(text)
                } else {
                    Action::SubmitPattern(text)
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                Action::Render
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::Render
            }
            _ => Action::None,
        }
    }

    const fn handle_help_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Action::HideHelp,
            _ => Action::None,
        }
    }

    const fn handle_confirm_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::ConfirmQuit,
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => Action::CancelQuit,
            _ => Action::None,
        }
    }

    /// Handles a mouse event and returns the resulting action.
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> Action {
        if self.mode != AppMode::Normal {
            return Action::None;
        }
        match event.kind {
            MouseEventKind::ScrollDown => Action::ScrollDown,
            MouseEventKind::ScrollUp => Action::ScrollUp,
            _ => Action::None,
        }
    }

    /// Handles pasted text. Only prompts accept it; line breaks are dropped.
    #[must_use]
    pub fn handle_paste(&mut self, text: &str) -> Action {
        if !self.mode.is_prompt() {
            return Action::None;
        }
        self.input
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
        Action::Render
    }

    /// Applies an action and returns the command to send to the tail
    /// worker, if any.
    pub fn update(&mut self, action: Action) -> Option<Command> {
        let len = self.line_count();
        match action {
            Action::ScrollDown => self.view.select_next(len),
            Action::ScrollUp => self.view.select_previous(len),
            Action::ScrollTop => self.view.select_first(len),
            Action::ScrollBottom => self.view.select_last(len),
            Action::PageDown => self.view.page_down(len),
            Action::PageUp => self.view.page_up(len),
            Action::ToggleFollow => {
                if self.view.follow {
                    self.view.follow = false;
                } else {
                    self.view.select_last(len);
                }
            }

            Action::EnterOpenPrompt => {
                self.input = self
                    .content
                    .target
                    .as_ref()
                    .map(|t| format!("{}/", t.directory()))
                    .unwrap_or_default();
                self.mode = AppMode::OpenPrompt;
            }
            Action::EnterPatternPrompt => {
                self.input = self.content.pattern.clone().unwrap_or_default();
                self.mode = AppMode::PatternPrompt;
            }
            Action::CancelPrompt => {
                self.input.clear();
                self.mode = AppMode::Normal;
            }
            Action::SubmitPath(text) => {
                self.mode = AppMode::Normal;
                let trimmed = text.trim();
                let choice = (!trimmed.is_empty()).then(|| Utf8PathBuf::from(trimmed));
                return Some(Command::ChooseFile(choice));
            }
            Action::SubmitPattern(text) => {
                self.mode = AppMode::Normal;
                return Some(Command::SubmitPattern(Some(text)));
            }

            Action::ClearFilter => {
                return self.is_filtered().then_some(Command::ClearFilter);
            }
            Action::Refresh => return Some(Command::Refresh),
            Action::CloseFile => return Some(Command::Close),

            Action::ToggleHelp => {
                self.mode = if self.mode == AppMode::Help {
                    AppMode::Normal
                } else {
                    AppMode::Help
                };
            }
            Action::HideHelp | Action::CancelQuit => self.mode = AppMode::Normal,
            Action::ClearStatus => {
                self.status = None;
                self.notice = None;
            }

            Action::RequestQuit => self.mode = AppMode::ConfirmQuit,
            Action::ConfirmQuit => self.should_quit = true,

            Action::Render | Action::None => {}
        }
        None
    }

    /// Applies output from the tail worker.
    pub fn apply_tail_update(&mut self, update: TailUpdate) {
        match update {
            TailUpdate::Content(content) => {
                debug!(lines = content.lines.len(), "Content update");
                if content.target.is_some() && content.target != self.content.target {
                    let height = self.view.visible_height;
                    self.view = LogViewState::new(self.config.follow_tail);
                    self.view.visible_height = height;
                }
                self.view.sync(content.lines.len());
                if content.is_closed() {
                    self.notice = None;
                }
                self.content = content;
            }
            TailUpdate::Status(level, text) => {
                self.status = Some(match level {
                    StatusLevel::Info => StatusMessage::info(text),
                    StatusLevel::Error => StatusMessage::error(text),
                });
            }
            TailUpdate::NewMatch(line) => {
                self.notice = Some(StatusMessage::info(format!(
                    "New match on line {}: {}",
                    line.number, line.text
                )));
            }
        }
    }

    /// Handles a tick event.
    pub fn tick(&mut self) {
        let timeout = Duration::from_secs(self.config.status_timeout_secs);
        if self.status.as_ref().is_some_and(|s| s.should_hide(timeout)) {
            self.status = None;
        }
        if self.notice.as_ref().is_some_and(|s| s.should_hide(timeout)) {
            self.notice = None;
        }
    }

    /// Updates the terminal size.
    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }
}

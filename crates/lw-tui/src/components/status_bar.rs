//! Status bar component.
//!
//! Displays the mode indicator, the latest status message, and any
//! new-match notice.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::{App, AppMode};
use crate::theme::Theme;

/// The status bar component.
pub struct StatusBar<'a> {
    app: &'a App,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Creates a new status bar.
    #[must_use]
    pub const fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn build_line(&self) -> Line<'a> {
        let mode_text = match self.app.mode {
            AppMode::Normal => "NORMAL",
            AppMode::OpenPrompt => "OPEN",
            AppMode::PatternPrompt => "PATTERN",
            AppMode::Help => "HELP",
            AppMode::ConfirmQuit => "QUIT",
        };
        let mut spans = vec![
            Span::styled(
                format!(" {mode_text} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];

        if let Some(status) = &self.app.status {
            let style = if status.is_error {
                self.theme.error_style()
            } else {
                self.theme.base_style()
            };
            spans.push(Span::styled(status.text.clone(), style));
        }

        if let Some(notice) = &self.app.notice {
            if self.app.status.is_some() {
                spans.push(Span::raw(" │ "));
            }
            spans.push(Span::styled(notice.text.clone(), self.theme.notice_style()));
        }

        Line::from(spans)
    }
}

impl Widget for &StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_line())
            .style(self.theme.status_bar_style)
            .render(area, buf);
    }
}

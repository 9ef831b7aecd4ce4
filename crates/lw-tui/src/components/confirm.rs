//! Quit confirmation overlay.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::theme::Theme;

/// A small yes/no dialog shown before quitting.
pub struct ConfirmDialog<'a> {
    question: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Creates a new dialog.
    #[must_use]
    pub const fn new(question: &'a str, theme: &'a Theme) -> Self {
        Self { question, theme }
    }
}

impl Widget for &ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Quit ",
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.bg));

        let text = vec![
            Line::styled(self.question, self.theme.base_style()),
            Line::from(vec![
                Span::styled("y", self.theme.notice_style()),
                Span::styled(" yes   ", self.theme.dimmed_style()),
                Span::styled("n", self.theme.notice_style()),
                Span::styled(" no", self.theme.dimmed_style()),
            ]),
        ];

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

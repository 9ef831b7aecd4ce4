//! Prompt input component.
//!
//! Displays a single-line text input overlay used for both the open-file
//! prompt and the pattern prompt.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Which value the prompt is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A path to a log file.
    OpenFile,
    /// A regular expression.
    Pattern,
}

impl PromptKind {
    const fn title(self) -> &'static str {
        match self {
            Self::OpenFile => " Open log file (Esc to cancel, Enter to open) ",
            Self::Pattern => " Watch for pattern (Esc to cancel, Enter to apply) ",
        }
    }

    const fn placeholder(self) -> &'static str {
        match self {
            Self::OpenFile => "Path to a log file...",
            Self::Pattern => "Regular expression...",
        }
    }
}

/// A text input overlay widget.
pub struct PromptInput<'a> {
    kind: PromptKind,
    text: &'a str,
    theme: &'a Theme,
}

impl<'a> PromptInput<'a> {
    /// Creates a new prompt widget.
    #[must_use]
    pub const fn new(kind: PromptKind, text: &'a str, theme: &'a Theme) -> Self {
        Self { kind, text, theme }
    }

    /// Returns the tail of `text` that fits in `width` columns, leaving
    /// room for the cursor.
    fn visible_text(&self, width: usize) -> &'a str {
        let budget = width.saturating_sub(1);
        if self.text.width() <= budget {
            return self.text;
        }
        let mut start = 0;
        for (idx, _) in self.text.char_indices() {
            if self.text[idx..].width() <= budget {
                start = idx;
                break;
            }
        }
        &self.text[start..]
    }
}

impl Widget for &PromptInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let cursor = Span::styled("▌", Style::default().fg(self.theme.accent));
        let inner_width = usize::from(area.width.saturating_sub(2));
        let content = if self.text.is_empty() {
            Line::from(vec![
                Span::styled(
                    self.kind.placeholder(),
                    self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
                ),
                cursor,
            ])
        } else {
            Line::from(vec![
                Span::styled(self.visible_text(inner_width), self.theme.base_style()),
                cursor,
            ])
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                self.kind.title(),
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.bg));

        Paragraph::new(content)
            .block(block)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

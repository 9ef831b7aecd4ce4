//! Header bar component.
//!
//! Displays the application name, the open file, the line count, and the
//! tail state.

use lw_tail::ContentUpdate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const MAX_PATH_WIDTH: usize = 48;

/// The header bar component.
pub struct HeaderBar<'a> {
    content: &'a ContentUpdate,
    follow: bool,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    /// Creates a new header bar.
    #[must_use]
    pub const fn new(content: &'a ContentUpdate, follow: bool, theme: &'a Theme) -> Self {
        Self {
            content,
            follow,
            theme,
        }
    }
}

/// Shortens `path` from the left so it fits in `max` columns.
pub(crate) fn truncate_start(path: &str, max: usize) -> String {
    if path.width() <= max {
        return path.to_owned();
    }
    let budget = max.saturating_sub(3);
    let tail = path
        .char_indices()
        .map(|(idx, _)| &path[idx..])
        .find(|rest| rest.width() <= budget)
        .unwrap_or_default();
    format!("...{tail}")
}

impl Widget for &HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = Span::styled(" │ ", self.theme.dimmed_style());
        let mut spans = vec![Span::styled("logwatch", self.theme.header_style)];

        if let Some(target) = &self.content.target {
            let state = if self.content.pattern.is_some() {
                "filtered"
            } else {
                "watching"
            };
            spans.extend([
                separator.clone(),
                Span::styled(
                    truncate_start(target.path().as_str(), MAX_PATH_WIDTH),
                    self.theme.base_style(),
                ),
                separator.clone(),
                Span::styled(
                    format!("{} lines", self.content.lines.len()),
                    self.theme.accent_style(),
                ),
                separator.clone(),
                Span::styled(state, self.theme.notice_style()),
            ]);
            if let Some(pattern) = &self.content.pattern {
                spans.push(Span::styled(format!(" /{pattern}/"), self.theme.base_style()));
            }
            if self.follow {
                spans.extend([separator.clone(), Span::styled("follow", self.theme.dimmed_style())]);
            }
        } else {
            spans.extend([
                separator.clone(),
                Span::styled("no file open", self.theme.dimmed_style()),
            ]);
        }
        spans.extend([separator, Span::styled("? for help", self.theme.dimmed_style())]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_start() {
        assert_eq!(truncate_start("/var/log/app.log", 40), "/var/log/app.log");
        assert_eq!(truncate_start("/var/log/app.log", 10), "...app.log");
    }

    #[test]
    fn test_header_without_file() {
        let theme = Theme::dark();
        let content = ContentUpdate::default();
        let area = Rect::new(0, 0, 60, 2);
        let mut buf = Buffer::empty(area);
        (&HeaderBar::new(&content, true, &theme)).render(area, &mut buf);
        let row: String = (0..60).map(|x| buf[(x, 0)].symbol().to_owned()).collect();
        assert!(row.starts_with("logwatch │ no file open"));
    }
}

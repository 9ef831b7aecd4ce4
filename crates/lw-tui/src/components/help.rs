//! Help panel component.
//!
//! Displays a modal overlay with key bindings.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table, Widget};

use crate::theme::Theme;

/// Key binding definition for the help panel.
struct KeyBinding {
    key: &'static str,
    description: &'static str,
    mode: &'static str,
}

const KEY_BINDINGS: &[KeyBinding] = &[
    // Navigation
    KeyBinding {
        key: "j / ↓",
        description: "Next line",
        mode: "Normal",
    },
    KeyBinding {
        key: "k / ↑",
        description: "Previous line",
        mode: "Normal",
    },
    KeyBinding {
        key: "g / Home",
        description: "Go to first line",
        mode: "Normal",
    },
    KeyBinding {
        key: "G / End",
        description: "Go to last line and follow",
        mode: "Normal",
    },
    KeyBinding {
        key: "PgDn / PgUp",
        description: "Page down / up",
        mode: "Normal",
    },
    KeyBinding {
        key: "f",
        description: "Toggle follow tail",
        mode: "Normal",
    },
    // Log actions
    KeyBinding {
        key: "o / Ctrl+o",
        description: "Open a log file",
        mode: "Normal",
    },
    KeyBinding {
        key: "/ / Ctrl+w",
        description: "Watch for a pattern",
        mode: "Normal",
    },
    KeyBinding {
        key: "Esc",
        description: "Clear pattern / Cancel",
        mode: "Any",
    },
    KeyBinding {
        key: "Enter",
        description: "Confirm input",
        mode: "Prompt",
    },
    KeyBinding {
        key: "r",
        description: "Reload from disk",
        mode: "Normal",
    },
    KeyBinding {
        key: "c",
        description: "Close the file",
        mode: "Normal",
    },
    KeyBinding {
        key: "?",
        description: "Toggle help panel",
        mode: "Normal",
    },
    KeyBinding {
        key: "q / Ctrl+c",
        description: "Quit",
        mode: "Any",
    },
];

/// A help panel overlay widget.
pub struct HelpPanel<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPanel<'a> {
    /// Creates a new help panel.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn build_rows(&self) -> Vec<Row<'static>> {
        KEY_BINDINGS
            .iter()
            .map(|binding| {
                Row::new(vec![
                    Cell::from(Span::styled(binding.key, self.theme.notice_style())),
                    Cell::from(Span::styled(binding.description, self.theme.base_style())),
                    Cell::from(Span::styled(binding.mode, self.theme.dimmed_style())),
                ])
            })
            .collect()
    }
}

impl Widget for &HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Help - Key Bindings ",
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.bg));

        let heading = self
            .theme
            .accent_style()
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let header = Row::new(vec![
            Cell::from(Span::styled("Key", heading)),
            Cell::from(Span::styled("Action", heading)),
            Cell::from(Span::styled("Mode", heading)),
        ])
        .height(1)
        .bottom_margin(1);

        let widths = [
            Constraint::Length(15),
            Constraint::Min(25),
            Constraint::Length(8),
        ];

        Table::new(self.build_rows(), widths)
            .block(block)
            .header(header)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_binding() {
        let theme = Theme::dark();
        let panel = HelpPanel::new(&theme);
        assert_eq!(panel.build_rows().len(), KEY_BINDINGS.len());
    }

    #[test]
    fn test_help_renders_title() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        (&HelpPanel::new(&theme)).render(area, &mut buf);
        let top: String = (0..60).map(|x| buf[(x, 0)].symbol().to_owned()).collect();
        assert!(top.contains("Help - Key Bindings"));
    }
}

//! Log view component.
//!
//! Renders the visible lines with a right-aligned line-number gutter and
//! the active pattern's matches highlighted. Only the rows inside the
//! scroll window are built.

use lw_core::HighlightSpan;
use lw_tail::ContentUpdate;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};

use crate::app::LogViewState;
use crate::theme::Theme;

/// A stateful log view widget.
pub struct LogView<'a> {
    content: &'a ContentUpdate,
    theme: &'a Theme,
}

impl<'a> LogView<'a> {
    /// Creates a new log view.
    #[must_use]
    pub const fn new(content: &'a ContentUpdate, theme: &'a Theme) -> Self {
        Self { content, theme }
    }

    fn title(&self) -> String {
        let shown = self.content.lines.len();
        match &self.content.pattern {
            Some(pattern) => format!(
                " {shown} of {} lines match /{pattern}/ ",
                self.content.lines.source().len()
            ),
            None => format!(" {shown} lines "),
        }
    }

    fn build_lines(&self, state: &LogViewState, height: usize) -> Vec<Line<'a>> {
        let gutter_width = self.content.lines.gutter_width();
        let start = state.scroll_offset;
        let end = (start + height).min(self.content.lines.len());

        (start..end)
            .filter_map(|position| {
                let record = self.content.lines.get(position)?;
                let spans = self
                    .content
                    .highlights
                    .get(&record.number)
                    .map_or(&[][..], |s| s.as_slice());

                let mut line = highlight_line(
                    &record.text,
                    spans,
                    self.theme.base_style(),
                    self.theme.match_style,
                );
                line.spans.insert(
                    0,
                    Span::styled(
                        format!("{:>gutter_width$} ", record.number),
                        self.theme.gutter_style,
                    ),
                );
                if state.selected == Some(position) {
                    line = line.style(self.theme.highlight_style);
                }
                Some(line)
            })
            .collect()
    }
}

impl StatefulWidget for &LogView<'_> {
    type State = LogViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let height = usize::from(area.height.saturating_sub(2));
        state.visible_height = height;
        state.ensure_visible();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(self.title(), self.theme.header_style));

        if self.content.is_closed() {
            Paragraph::new(Line::styled(
                "No log open. Press o to open one.",
                self.theme.dimmed_style(),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        Paragraph::new(self.build_lines(state, height))
            .block(block)
            .render(area, buf);
    }
}

/// Splits `text` into styled spans, applying `matched` to each highlight
/// span and `base` to the rest. Spans that fall outside the text or off a
/// char boundary are ignored.
pub fn highlight_line<'a>(
    text: &'a str,
    spans: &[HighlightSpan],
    base: Style,
    matched: Style,
) -> Line<'a> {
    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        if span.start < cursor || span.is_empty() {
            continue;
        }
        let (Some(before), Some(hit)) = (text.get(cursor..span.start), text.get(span.start..span.end))
        else {
            continue;
        };
        if !before.is_empty() {
            out.push(Span::styled(before, base));
        }
        out.push(Span::styled(hit, matched));
        cursor = span.end;
    }

    if let Some(rest) = text.get(cursor..) {
        if !rest.is_empty() {
            out.push(Span::styled(rest, base));
        }
    }
    Line::from(out)
}

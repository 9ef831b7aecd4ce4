//! Main UI layout and rendering orchestration.
//!
//! # Layout Structure
//!
//! ```text
//! +------------------------------------------------------------------+
//! | logwatch | /var/log/app.log | 120 lines | filtered /ERR/ | ?     |
//! +------------------------------------------------------------------+
//! | +- 3 of 120 lines match /ERR/ --------------------------------+  |
//! | |  12 ERR disk full                                           |  |
//! | |  57 ERR retry limit                                         |  |
//! | | 118 ERR connection reset                                    |  |
//! | +-------------------------------------------------------------+  |
//! +------------------------------------------------------------------+
//! | NORMAL  Matched 3 occurences! | New match on line 118: ...       |
//! +------------------------------------------------------------------+
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{App, AppMode};
use crate::components::{
    ConfirmDialog, HeaderBar, HelpPanel, LogView, PromptInput, PromptKind, StatusBar,
};
use crate::theme::Theme;

/// Renders the entire UI based on the current application state.
pub fn render(app: &mut App, frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Log view
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = HeaderBar::new(&app.content, app.view.follow, theme);
    frame.render_widget(&header, chunks[0]);

    let log_view = LogView::new(&app.content, theme);
    frame.render_stateful_widget(&log_view, chunks[1], &mut app.view);

    let status_bar = StatusBar::new(app, theme);
    frame.render_widget(&status_bar, chunks[2]);

    match app.mode {
        AppMode::OpenPrompt | AppMode::PatternPrompt => {
            let kind = if app.mode == AppMode::OpenPrompt {
                PromptKind::OpenFile
            } else {
                PromptKind::Pattern
            };
            let prompt = PromptInput::new(kind, &app.input, theme);
            frame.render_widget(&prompt, centered_fixed(60, 3, area));
        }
        AppMode::Help => {
            let help_panel = HelpPanel::new(theme);
            frame.render_widget(&help_panel, centered_rect(60, 70, area));
        }
        AppMode::ConfirmQuit => {
            let dialog = ConfirmDialog::new("You sure?", theme);
            frame.render_widget(&dialog, centered_fixed(30, 4, area));
        }
        AppMode::Normal => {}
    }
}

/// Creates a centered rectangle with the given percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Creates a centered rectangle with percentage width and a fixed height.
fn centered_fixed(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    let row = Rect::new(area.x, y, area.width, height);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(row)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_core::TuiConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 50, area);

        assert!(centered.x > 0);
        assert!(centered.y > 0);
        assert!(centered.width < area.width);
        assert!(centered.height < area.height);
    }

    #[test]
    fn test_centered_fixed_clamps_height() {
        let area = Rect::new(0, 0, 100, 2);
        let rect = centered_fixed(60, 3, area);
        assert_eq!(rect.height, 2);
        assert_eq!(rect.y, 0);

        let rect = centered_fixed(60, 3, Rect::new(0, 0, 100, 21));
        assert_eq!(rect.y, 9);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn test_render_confirm_overlay() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        let theme = Theme::dark();
        let mut app = App::new(TuiConfig::default());
        app.mode = AppMode::ConfirmQuit;

        terminal
            .draw(|frame| render(&mut app, frame, &theme))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let screen: String = (0..20)
            .flat_map(|y| (0..60).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_owned())
            .collect();
        assert!(screen.contains("You sure?"));
        assert!(screen.contains("no file open"));
    }
}

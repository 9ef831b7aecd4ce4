//! Theme and styling for the TUI.
//!
//! # Example
//!
//! ```
//! use lw_tui::Theme;
//!
//! let theme = Theme::dark();
//! let style = theme.match_style;
//! ```

use lw_core::ColorScheme;
use ratatui::style::{Color, Modifier, Style};

/// Colors and styles used throughout the interface.
///
/// Use [`Theme::dark()`] or [`Theme::light()`] for the built-in palettes,
/// or [`Theme::from_scheme()`] to pick one from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // =========================================================================
    // Base Colors
    // =========================================================================
    /// Primary foreground color.
    pub fg: Color,

    /// Primary background color.
    pub bg: Color,

    /// Dimmed/secondary text color.
    pub dimmed_fg: Color,

    /// Accent color for highlights.
    pub accent: Color,

    /// Error/warning color.
    pub error_fg: Color,

    /// Color for new-match notices.
    pub notice_fg: Color,

    // =========================================================================
    // Border Styles
    // =========================================================================
    /// Style for normal borders.
    pub border_style: Style,

    /// Style for focused borders.
    pub focused_border_style: Style,

    // =========================================================================
    // Log View Styles
    // =========================================================================
    /// Style for the line under the cursor.
    pub highlight_style: Style,

    /// Style for text matched by the active pattern.
    pub match_style: Style,

    /// Style for the line-number gutter.
    pub gutter_style: Style,

    // =========================================================================
    // Component Styles
    // =========================================================================
    /// Style for the header bar.
    pub header_style: Style,

    /// Style for the status bar.
    pub status_bar_style: Style,
}

impl Theme {
    /// Creates a dark theme (light text on dark background).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(220, 220, 220),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(100, 150, 255), // Soft blue
            error_fg: Color::Rgb(255, 80, 80),
            notice_fg: Color::Rgb(255, 200, 100),

            border_style: Style::default().fg(Color::Rgb(80, 80, 100)),
            focused_border_style: Style::default().fg(Color::Rgb(100, 150, 255)),

            highlight_style: Style::default().bg(Color::Rgb(60, 60, 80)),
            match_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(255, 200, 100))
                .add_modifier(Modifier::BOLD),
            gutter_style: Style::default().fg(Color::Rgb(100, 100, 120)),

            header_style: Style::default()
                .fg(Color::Rgb(100, 150, 255))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .bg(Color::Rgb(40, 40, 50)),
        }
    }

    /// Creates a light theme (dark text on light background).
    #[must_use]
    pub fn light() -> Self {
        Self {
            fg: Color::Rgb(30, 30, 30),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(50, 100, 200), // Dark blue
            error_fg: Color::Rgb(180, 50, 50),
            notice_fg: Color::Rgb(160, 100, 20),

            border_style: Style::default().fg(Color::Rgb(150, 150, 170)),
            focused_border_style: Style::default().fg(Color::Rgb(50, 100, 200)),

            highlight_style: Style::default().bg(Color::Rgb(210, 210, 230)),
            match_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(255, 220, 120))
                .add_modifier(Modifier::BOLD),
            gutter_style: Style::default().fg(Color::Rgb(140, 140, 160)),

            header_style: Style::default()
                .fg(Color::Rgb(50, 100, 200))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(60, 60, 60))
                .bg(Color::Rgb(220, 220, 230)),
        }
    }

    /// Creates a theme from a [`ColorScheme`] configuration.
    ///
    /// [`ColorScheme::Auto`] falls back to the dark theme.
    #[must_use]
    pub fn from_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark | ColorScheme::Auto | _ => Self::dark(),
        }
    }

    /// Returns a theme with every color stripped, for `--no-color`.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            dimmed_fg: Color::Reset,
            accent: Color::Reset,
            error_fg: Color::Reset,
            notice_fg: Color::Reset,
            border_style: Style::default(),
            focused_border_style: Style::default().add_modifier(Modifier::BOLD),
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            match_style: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            gutter_style: Style::default().add_modifier(Modifier::DIM),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            status_bar_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Returns a style with the base foreground color.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Returns a style for dimmed/secondary text.
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed_fg)
    }

    /// Returns a style for accent/highlighted text.
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns a style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }

    /// Returns a style for new-match notices.
    #[must_use]
    pub fn notice_style(&self) -> Style {
        Style::default()
            .fg(self.notice_fg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

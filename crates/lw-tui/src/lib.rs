//! Terminal log viewer for logwatch, built on Ratatui.
//!
//! # Architecture
//!
//! ```text
//! crates/lw-tui/src/
//!   lib.rs            # run() and the main loop
//!   app.rs            # Application state, key handling, view state
//!   event.rs          # Event types (Key, Paste, Tail, Tick, Render)
//!   tui.rs            # Terminal wrapper with async event streaming
//!   action.rs         # User actions produced by key bindings
//!   ui.rs             # Layout and overlay orchestration
//!   theme.rs          # Color schemes
//!   error.rs          # TUI-specific error types
//!   components/
//!     log_view.rs     # LogView with gutter and match highlighting
//!     header.rs       # HeaderBar
//!     status_bar.rs   # StatusBar
//!     prompt_input.rs # Open/pattern prompt overlay
//!     help.rs         # HelpPanel overlay
//!     confirm.rs      # Quit confirmation overlay
//! ```
//!
//! The tail worker runs on tokio's blocking pool. Its updates are forwarded
//! into the terminal event channel, so the main loop only ever waits on
//! [`Tui::next_event`].
//!
//! # Usage
//!
//! ```no_run
//! use lw_core::Config;
//! use lw_tui::{Launch, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lw_tui::TuiError> {
//!     let launch = Launch {
//!         file: Some("/var/log/syslog".into()),
//!         ..Launch::default()
//!     };
//!     run(Config::default(), launch).await
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod app;
pub mod components;
pub mod error;
pub mod event;
pub mod theme;
pub mod tui;
pub mod ui;

use camino::Utf8PathBuf;
use lw_core::Config;
use lw_tail::{ChannelPresenter, EventQueue, TailHandle, TailService, TailUpdate};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

pub use action::Action;
pub use app::{App, AppMode, LogViewState, StatusMessage};
pub use error::TuiError;
pub use event::Event;
pub use theme::Theme;
pub use tui::Tui;

/// What to do right after the UI starts.
#[derive(Debug, Clone, Default)]
pub struct Launch {
    /// File to open immediately.
    pub file: Option<Utf8PathBuf>,

    /// Pattern to apply once the file is open.
    pub pattern: Option<String>,

    /// Render without colors.
    pub monochrome: bool,
}

/// Runs the TUI until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or the tail worker
/// stops unexpectedly.
pub async fn run(config: Config, launch: Launch) -> Result<(), TuiError> {
    config.validate()?;

    let (presenter, updates) = ChannelPresenter::channel();
    let (handle, service) = TailService::new(&config, presenter);
    let worker = service.spawn();

    if let Some(path) = launch.file {
        handle.open_file(path)?;
        if let Some(pattern) = launch.pattern {
            handle.set_filter(pattern)?;
        }
    }

    let mut tui = Tui::new(&config.tui)?;
    let forwarder = tokio::spawn(forward_updates(updates, tui.event_sender()));

    let theme = if launch.monochrome {
        Theme::monochrome()
    } else {
        Theme::from_scheme(config.tui.color_scheme)
    };
    let mut app = App::new(config.tui);

    tui.enter()?;
    info!("Entering main event loop");
    let result = run_event_loop(&mut tui, &mut app, &handle, &theme).await;
    tui.exit()?;

    handle.shutdown();
    if let Err(e) = worker.await {
        error!(error = %e, "Tail worker ended abnormally");
    }
    forwarder.abort();

    result
}

async fn run_event_loop(
    tui: &mut Tui,
    app: &mut App,
    handle: &TailHandle,
    theme: &Theme,
) -> Result<(), TuiError> {
    tui.draw(|frame| ui::render(app, frame, theme))?;

    loop {
        let Some(event) = tui.next_event().await else {
            return Err(TuiError::ChannelClosed);
        };

        let action = dispatch_event(app, event);
        let redraw = action.needs_render();
        if let Some(command) = app.update(action) {
            debug!(?command, "Sending command to tail worker");
            handle.send(command)?;
        }

        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }
        if redraw {
            tui.draw(|frame| ui::render(app, frame, theme))?;
        }
    }
}

fn dispatch_event(app: &mut App, event: Event) -> Action {
    match event {
        Event::Key(key) => app.handle_key(key),
        Event::Paste(text) => app.handle_paste(&text),
        Event::Mouse(mouse) => app.handle_mouse(mouse),
        Event::Resize { width, height } => {
            app.set_terminal_size(ratatui::layout::Rect::new(0, 0, width, height));
            Action::Render
        }
        Event::Tail(update) => {
            app.apply_tail_update(update);
            Action::Render
        }
        Event::Tick => {
            app.tick();
            Action::None
        }
        Event::Render => Action::Render,
        Event::FocusGained | Event::FocusLost => Action::None,
    }
}

/// Moves tail updates into the terminal event channel until either side
/// closes.
pub async fn forward_updates(
    mut updates: EventQueue<TailUpdate>,
    tx: mpsc::Sender<Event>,
) {
    while let Some(update) = updates.recv().await {
        if tx.send(Event::Tail(update)).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use lw_core::TuiConfig;
    use lw_tail::{Command, StatusLevel};

    #[test]
    fn test_dispatch_tail_update_renders() {
        let mut app = App::new(TuiConfig::default());
        let action = dispatch_event(
            &mut app,
            Event::Tail(TailUpdate::Status(StatusLevel::Info, "Filter cleared".to_owned())),
        );
        assert_eq!(action, Action::Render);
        assert_eq!(
            app.status.as_ref().map(|s| s.text.as_str()),
            Some("Filter cleared")
        );
    }

    #[test]
    fn test_dispatch_key_to_command() {
        let mut app = App::new(TuiConfig::default());
        let action = dispatch_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
        );
        assert!(matches!(app.update(action), Some(Command::Refresh)));
    }

    #[tokio::test]
    async fn test_forward_updates_wraps_events() {
        let (presenter, updates) = ChannelPresenter::channel();
        let (tx, mut rx) = mpsc::channel(4);
        let forwarder = tokio::spawn(forward_updates(updates, tx));

        let mut presenter = presenter;
        lw_tail::Presenter::on_status(&mut presenter, StatusLevel::Error, "Error: x");
        drop(presenter);

        let event = rx.recv().await;
        assert!(matches!(
            event,
            Some(Event::Tail(TailUpdate::Status(StatusLevel::Error, ref t))) if t == "Error: x"
        ));
        forwarder.await.expect("forwarder finished");
    }
}

//! Terminal wrapper with async event streaming.
//!
//! [`Tui`] owns the Ratatui terminal and a background task that merges
//! crossterm input with tick and render timers into one channel. Other
//! producers, such as the tail worker forwarder, inject events through
//! [`Tui::event_sender`].
//!
//! ```text
//! EventStream ─┐
//! tick timer  ─┼─► mpsc::Sender<Event> ──► Tui::next_event() ──► main loop
//! render timer ┘          ▲
//!                         └── tail update forwarder
//! ```

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::ExecutableCommand;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    EventStream, KeyEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use lw_core::TuiConfig;
use ratatui::Terminal;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace, warn};

use crate::error::TuiError;
use crate::event::Event;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Terminal wrapper with async event streaming.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
    tick_delay: Duration,
    render_delay: Duration,
    entered: bool,
}

impl Tui {
    /// Creates a new TUI using the configured tick and frame rates.
    ///
    /// The terminal is not entered yet; call [`enter()`](Self::enter) to
    /// switch to raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new(config: &TuiConfig) -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let (tick_delay, render_delay) = Self::delays(config);
        debug!(
            tick_delay_ms = tick_delay.as_millis(),
            render_delay_ms = render_delay.as_millis(),
            "Created TUI"
        );

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            task: None,
            cancellation_token: CancellationToken::new(),
            tick_delay,
            render_delay,
            entered: false,
        })
    }

    fn delays(config: &TuiConfig) -> (Duration, Duration) {
        let tick = Duration::from_millis(config.tick_rate_ms.max(1));
        let render = Duration::from_secs(1) / config.frame_rate.max(1);
        (tick, render)
    }

    /// Returns a sender for injecting events into the loop.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<Event> {
        self.event_tx.clone()
    }

    /// Enters the terminal (raw mode, alternate screen, mouse capture).
    ///
    /// # Errors
    ///
    /// Returns an error if terminal mode cannot be changed.
    pub fn enter(&mut self) -> Result<(), TuiError> {
        debug!("Entering terminal");

        enable_raw_mode()?;
        self.entered = true;
        io::stdout().execute(EnterAlternateScreen)?;
        io::stdout().execute(EnableMouseCapture)?;
        io::stdout().execute(EnableBracketedPaste)?;

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;

        self.start_event_loop();
        Ok(())
    }

    /// Restores the terminal. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal mode cannot be restored.
    pub fn exit(&mut self) -> Result<(), TuiError> {
        self.stop_event_loop();
        if !self.entered {
            return Ok(());
        }
        debug!("Exiting terminal");
        self.entered = false;

        self.terminal.show_cursor()?;
        io::stdout().execute(DisableBracketedPaste)?;
        io::stdout().execute(DisableMouseCapture)?;
        io::stdout().execute(LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }

    /// Draws a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    pub fn draw<F>(&mut self, f: F) -> Result<(), TuiError>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }

    /// Waits for the next event. Returns `None` once every sender is gone.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    /// Returns the terminal size.
    #[must_use]
    pub fn size(&self) -> Rect {
        let size = self.terminal.size().unwrap_or_default();
        Rect::new(0, 0, size.width, size.height)
    }

    fn start_event_loop(&mut self) {
        let event_tx = self.event_tx.clone();
        let cancellation_token = self.cancellation_token.clone();
        let tick_delay = self.tick_delay;
        let render_delay = self.render_delay;

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                let event = tokio::select! {
                    () = cancellation_token.cancelled() => break,
                    _ = tick_interval.tick() => Some(Event::Tick),
                    _ = render_interval.tick() => Some(Event::Render),
                    event = Self::read_crossterm_event(&mut reader) => event,
                };

                if let Some(event) = event {
                    trace!(?event, "Sending event");
                    if event_tx.send(event).await.is_err() {
                        error!("Event channel closed");
                        break;
                    }
                }
            }

            debug!("Event loop ended");
        });

        self.task = Some(task);
    }

    fn stop_event_loop(&mut self) {
        self.cancellation_token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    async fn read_crossterm_event(reader: &mut EventStream) -> Option<Event> {
        use futures_util::StreamExt;

        match reader.next().await {
            Some(Ok(event)) => Self::convert_crossterm_event(event),
            Some(Err(e)) => {
                warn!(error = %e, "Error reading terminal event");
                None
            }
            None => {
                // Stream is finished; park so the timers keep running.
                std::future::pending().await
            }
        }
    }

    fn convert_crossterm_event(event: crossterm::event::Event) -> Option<Event> {
        use crossterm::event::Event as CrosstermEvent;

        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            CrosstermEvent::Key(_) => None,
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            CrosstermEvent::FocusGained => Some(Event::FocusGained),
            CrosstermEvent::FocusLost => Some(Event::FocusLost),
            CrosstermEvent::Paste(text) => Some(Event::Paste(text)),
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!(error = %e, "Failed to restore terminal on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_delays_from_config() {
        let config = TuiConfig {
            tick_rate_ms: 100,
            frame_rate: 20,
            ..TuiConfig::default()
        };
        let (tick, render) = Tui::delays(&config);
        assert_eq!(tick, Duration::from_millis(100));
        assert_eq!(render, Duration::from_millis(50));
    }

    #[test]
    fn test_convert_ignores_key_release() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(Tui::convert_crossterm_event(crossterm::event::Event::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(
            Tui::convert_crossterm_event(crossterm::event::Event::Key(press))
                .is_some_and(|e| e.is_key())
        );
    }

    #[test]
    fn test_convert_paste() {
        let event = Tui::convert_crossterm_event(crossterm::event::Event::Paste("x".to_owned()));
        assert!(matches!(event, Some(Event::Paste(ref t)) if t == "x"));
    }
}

//! The tail controller state machine.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use lw_content::{ContentStore, FilterState, PatternFilter, VisibleLineSet};
use lw_core::{Config, LineRecord, WatchTarget, fx_hash_map};
use lw_watcher::{ChangeEvent, ChangeObserver};
use tracing::{debug, info, warn};

use crate::error::TailError;
use crate::presenter::{ContentUpdate, Presenter, StatusLevel};
use crate::state::TailState;

/// Where change events from the observer are sent.
pub type ChangeSink = Arc<dyn Fn(ChangeEvent) + Send + Sync>;

/// Why a refresh is happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCause {
    /// The observer reported a change.
    Change,
    /// The user asked for a refresh.
    Manual,
}

/// Identifies one refresh. A refresh completes only if its ticket is still
/// current; opening or closing a file invalidates outstanding tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    path: Utf8PathBuf,
}

impl RefreshTicket {
    /// The file this refresh reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Owns the watch lifecycle for one file and publishes what to show.
///
/// Every public operation reports failures to the presenter as an
/// `"Error: ..."` status and also returns them. A failed operation leaves the
/// target, filter, and content exactly as they were.
pub struct TailController<P> {
    presenter: P,
    state: TailState,
    target: Option<WatchTarget>,
    filter: FilterState,
    store: ContentStore,
    patterns: PatternFilter,
    observer: ChangeObserver,
    sink: Option<ChangeSink>,
    generation: u64,
    last_match: Option<LineRecord>,
}

impl<P> std::fmt::Debug for TailController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailController")
            .field("state", &self.state)
            .field("target", &self.target)
            .field("pattern", &self.filter.raw_text())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<P: Presenter> TailController<P> {
    /// Creates an idle controller.
    ///
    /// With no `sink`, or with watching disabled in `config`, files are read
    /// on open and on manual refresh only.
    pub fn new(config: &Config, presenter: P, sink: Option<ChangeSink>) -> Self {
        Self {
            presenter,
            state: TailState::Idle,
            target: None,
            filter: FilterState::none(),
            store: ContentStore::new(),
            patterns: PatternFilter::new(&config.filter),
            observer: ChangeObserver::new(),
            sink: sink.filter(|_| config.watch.enabled),
            generation: 0,
            last_match: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TailState {
        self.state
    }

    /// The open file, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&WatchTarget> {
        self.target.as_ref()
    }

    /// The active filter.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The records that would be shown right now.
    #[must_use]
    pub fn visible(&self) -> VisibleLineSet {
        self.store.visible(&self.filter)
    }

    /// The presenter.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Opens `path`, replacing any file already open, and clears the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if its
    /// directory cannot be watched. The previous file stays open.
    pub fn open_file(&mut self, path: &Utf8Path) -> Result<(), TailError> {
        let result = self.try_open(path);
        self.report(result)
    }

    /// Applies the result of a file chooser. `None` does nothing.
    ///
    /// # Errors
    ///
    /// See [`open_file`](Self::open_file).
    pub fn submit_chosen_file(&mut self, choice: Option<&Utf8Path>) -> Result<(), TailError> {
        match choice {
            Some(path) => self.open_file(path),
            None => Ok(()),
        }
    }

    /// Installs `raw` as the filter. Empty input does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::NoFileOpen`] when idle, or
    /// [`TailError::Content`] if the pattern does not compile. The previous
    /// filter stays in effect.
    pub fn set_filter(&mut self, raw: &str) -> Result<(), TailError> {
        let result = self.try_set_filter(raw);
        self.report(result)
    }

    /// Applies the result of a pattern prompt. Cancelled or empty input does
    /// nothing; it does not clear the filter.
    ///
    /// # Errors
    ///
    /// See [`set_filter`](Self::set_filter).
    pub fn submit_pattern_input(&mut self, input: Option<&str>) -> Result<(), TailError> {
        match input {
            Some(raw) if !raw.is_empty() => self.set_filter(raw),
            _ => Ok(()),
        }
    }

    /// Drops the filter and shows every line again.
    pub fn clear_filter(&mut self) {
        if self.state != TailState::WatchingFiltered {
            return;
        }
        self.filter = FilterState::none();
        self.state = TailState::Watching;
        info!("Filter cleared");
        self.publish(RefreshCause::Manual);
        self.presenter.on_status(StatusLevel::Info, "Filter cleared");
    }

    /// Re-reads the file after the observer reported a change.
    ///
    /// Events for a file other than the open one, or arriving while idle,
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded. The previous
    /// content stays on screen.
    pub fn on_change_event(&mut self, event: &ChangeEvent) -> Result<(), TailError> {
        let Some(target) = &self.target else {
            debug!(path = %event.path, "Change event while idle");
            return Ok(());
        };
        if !target.matches(&event.path) {
            debug!(path = %event.path, "Change event for a file no longer open");
            return Ok(());
        }
        let result = self.refresh(RefreshCause::Change);
        self.report(result)
    }

    /// Re-reads the file on request.
    ///
    /// # Errors
    ///
    /// Returns [`TailError::NoFileOpen`] when idle, or an error if the file
    /// cannot be read or decoded.
    pub fn manual_refresh(&mut self) -> Result<(), TailError> {
        let result = self.refresh(RefreshCause::Manual);
        self.report(result)
    }

    /// Stops watching and clears everything.
    pub fn close(&mut self) {
        self.observer.stop();
        self.store.clear();
        self.filter = FilterState::none();
        self.last_match = None;
        self.generation += 1;
        if let Some(target) = self.target.take() {
            info!(path = %target.path(), "Closed file");
        }
        self.state = TailState::Idle;
        self.presenter.on_content_updated(&ContentUpdate::default());
    }

    /// Captures a ticket for a refresh of the open file.
    #[must_use]
    pub fn begin_refresh(&self) -> Option<RefreshTicket> {
        self.target.as_ref().map(|target| RefreshTicket {
            generation: self.generation,
            path: target.path().to_owned(),
        })
    }

    /// Completes a refresh started with [`begin_refresh`](Self::begin_refresh).
    ///
    /// Returns `Ok(false)` without publishing if the ticket is stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the read failed or the bytes do not decode.
    pub fn complete_refresh(
        &mut self,
        ticket: &RefreshTicket,
        bytes: std::io::Result<Vec<u8>>,
        cause: RefreshCause,
    ) -> Result<bool, TailError> {
        let current = self.target.as_ref().is_some_and(|t| t.path() == ticket.path);
        if ticket.generation != self.generation || !current {
            debug!(path = %ticket.path, "Discarding stale refresh");
            return Ok(false);
        }
        let bytes = bytes.map_err(|err| TailError::file_access(&ticket.path, err))?;
        let raw = ContentStore::decode(bytes)?;
        self.store.replace(raw);
        self.publish(cause);
        Ok(true)
    }

    fn refresh(&mut self, cause: RefreshCause) -> Result<(), TailError> {
        let ticket = self.begin_refresh().ok_or(TailError::NoFileOpen)?;
        let bytes = std::fs::read(ticket.path.as_std_path());
        self.complete_refresh(&ticket, bytes, cause).map(|_| ())
    }

    fn try_open(&mut self, path: &Utf8Path) -> Result<(), TailError> {
        let target = WatchTarget::resolve(path)?;
        let bytes = std::fs::read(target.path().as_std_path())
            .map_err(|err| TailError::file_access(target.path(), err))?;
        let raw = ContentStore::decode(bytes)?;

        if let Some(sink) = &self.sink {
            if self.observer.is_started() {
                self.observer.retarget(target.clone())?;
            } else {
                let sink = Arc::clone(sink);
                self.observer.start(target.clone(), move |event| sink(event))?;
            }
        }

        self.generation += 1;
        self.store.replace(raw);
        self.filter = FilterState::none();
        self.last_match = None;
        self.state = TailState::Watching;
        info!(path = %target.path(), lines = self.store.lines().len(), "Opened file");
        let message = format!("Watching {}", target.path());
        self.target = Some(target);
        self.publish(RefreshCause::Manual);
        self.presenter.on_status(StatusLevel::Info, &message);
        Ok(())
    }

    fn try_set_filter(&mut self, raw: &str) -> Result<(), TailError> {
        if raw.is_empty() {
            return Ok(());
        }
        if !self.state.is_watching() {
            return Err(TailError::NoFileOpen);
        }
        self.filter = FilterState::compile(&self.patterns, raw)?;
        self.state = TailState::WatchingFiltered;
        let count = self.publish(RefreshCause::Manual);
        info!(pattern = raw, matched = count, "Filter applied");
        self.presenter
            .on_status(StatusLevel::Info, &format!("Matched {count} occurences!"));
        Ok(())
    }

    /// Publishes the current view and returns the number of visible lines.
    fn publish(&mut self, cause: RefreshCause) -> usize {
        let lines = self.store.visible(&self.filter);
        let highlights = self
            .filter
            .pattern()
            .map_or_else(fx_hash_map, |pattern| lines.highlights(pattern));
        let last = lines.last().cloned();
        let count = lines.len();

        let update = ContentUpdate {
            target: self.target.clone(),
            lines,
            highlights,
            pattern: self.filter.pattern().map(|p| p.as_str().to_owned()),
        };
        self.presenter.on_content_updated(&update);

        if cause == RefreshCause::Change && self.filter.is_active() && last != self.last_match {
            if let Some(line) = &last {
                debug!(number = line.number, "New match");
                self.presenter.on_new_match(line);
            }
        }
        self.last_match = last;
        count
    }

    fn report(&mut self, result: Result<(), TailError>) -> Result<(), TailError> {
        if let Err(err) = &result {
            warn!(error = %err, state = %self.state, "Operation failed");
            self.presenter
                .on_status(StatusLevel::Error, &err.status_message());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct Recorder {
        updates: Vec<ContentUpdate>,
        statuses: Vec<(StatusLevel, String)>,
        matches: Vec<LineRecord>,
    }

    impl Recorder {
        fn last_lines(&self) -> Vec<(usize, String)> {
            self.updates
                .last()
                .map(|u| u.lines.iter().map(|l| (l.number, l.text.clone())).collect())
                .unwrap_or_default()
        }

        fn last_status(&self) -> Option<&(StatusLevel, String)> {
            self.statuses.last()
        }
    }

    impl Presenter for Recorder {
        fn on_content_updated(&mut self, update: &ContentUpdate) {
            self.updates.push(update.clone());
        }

        fn on_status(&mut self, level: StatusLevel, message: &str) {
            self.statuses.push((level, message.to_owned()));
        }

        fn on_new_match(&mut self, line: &LineRecord) {
            self.matches.push(line.clone());
        }
    }

    fn controller() -> TailController<Recorder> {
        TailController::new(&Config::default(), Recorder::default(), None)
    }

    fn log_file(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("write log");
        Utf8PathBuf::from_path_buf(path).expect("utf-8 path")
    }

    fn watched(tail: &TailController<Recorder>) -> Utf8PathBuf {
        tail.target().expect("file open").path().to_owned()
    }

    fn lines(pairs: &[(usize, &str)]) -> Vec<(usize, String)> {
        pairs.iter().map(|(n, t)| (*n, (*t).to_owned())).collect()
    }

    #[test]
    fn test_open_publishes_numbered_lines() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "a\nb\nc\n");
        let mut tail = controller();

        tail.open_file(&path).expect("open");

        assert_eq!(tail.state(), TailState::Watching);
        assert_eq!(
            tail.presenter().last_lines(),
            lines(&[(1, "a"), (2, "b"), (3, "c"), (4, "")])
        );
    }

    #[test]
    fn test_filter_reports_match_count() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "a\nb\nc\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");

        tail.set_filter("b").expect("filter");

        assert_eq!(tail.state(), TailState::WatchingFiltered);
        assert_eq!(tail.presenter().last_lines(), lines(&[(2, "b")]));
        let (level, message) = tail.presenter().last_status().expect("status");
        assert_eq!(*level, StatusLevel::Info);
        insta::assert_snapshot!(message, @"Matched 1 occurences!");
        let update = tail.presenter().updates.last().expect("update");
        assert_eq!(update.highlights[&2].len(), 1);
        assert_eq!(update.pattern.as_deref(), Some("b"));
    }

    #[test]
    fn test_invalid_pattern_keeps_view() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "a\nb\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        let published = tail.presenter().updates.len();

        let err = tail.set_filter("(").expect_err("invalid");

        assert!(matches!(err, TailError::Content(ref e) if e.is_invalid_pattern()));
        assert_eq!(tail.state(), TailState::Watching);
        assert_eq!(tail.presenter().updates.len(), published);
        let (level, message) = tail.presenter().last_status().expect("status");
        assert_eq!(*level, StatusLevel::Error);
        assert!(message.starts_with("Error: invalid pattern '('"));
    }

    #[test]
    fn test_invalid_pattern_keeps_previous_filter() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "ERR a\nok\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("ERR").expect("filter");

        assert!(tail.set_filter("[").is_err());

        assert_eq!(tail.state(), TailState::WatchingFiltered);
        assert_eq!(tail.filter().raw_text(), "ERR");
    }

    #[test]
    fn test_empty_or_cancelled_pattern_is_noop() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "ERR\nok\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("ERR").expect("filter");
        let published = tail.presenter().updates.len();

        tail.submit_pattern_input(None).expect("cancel");
        tail.submit_pattern_input(Some("")).expect("empty");
        tail.set_filter("").expect("empty");

        assert_eq!(tail.state(), TailState::WatchingFiltered);
        assert_eq!(tail.presenter().updates.len(), published);
    }

    #[test]
    fn test_filter_while_idle() {
        let mut tail = controller();
        let err = tail.set_filter("x").expect_err("idle");
        assert!(matches!(err, TailError::NoFileOpen));
        assert_eq!(tail.state(), TailState::Idle);
        assert_eq!(
            tail.presenter().last_status().map(|(_, m)| m.as_str()),
            Some("Error: no file is open")
        );
    }

    #[test]
    fn test_clear_filter_restores_all_lines() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "x\ny");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("y").expect("filter");

        tail.clear_filter();

        assert_eq!(tail.state(), TailState::Watching);
        assert_eq!(tail.presenter().last_lines(), lines(&[(1, "x"), (2, "y")]));
        assert!(tail.presenter().updates.last().expect("update").highlights.is_empty());
    }

    #[test]
    fn test_missing_file_keeps_previous_state() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "keep");
        let mut tail = controller();
        tail.open_file(&path).expect("open");

        let missing = Utf8PathBuf::from_path_buf(dir.path().join("missing.log")).expect("utf-8");
        let err = tail.open_file(&missing).expect_err("missing");

        assert!(matches!(err, TailError::FileAccess { .. }));
        assert_eq!(tail.target().map(WatchTarget::file_name), Some("app.log"));
        assert_eq!(tail.visible().to_vec(), vec![LineRecord::new(1, "keep")]);
    }

    #[test]
    fn test_undecodable_file_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("bin.log");
        fs::write(&path, [b'o', b'k', 0xff]).expect("write");
        let path = Utf8PathBuf::from_path_buf(path).expect("utf-8");
        let mut tail = controller();

        let err = tail.open_file(&path).expect_err("decode");

        assert!(matches!(err, TailError::Content(ref e) if e.is_decode()));
        assert_eq!(tail.state(), TailState::Idle);
    }

    #[test]
    fn test_change_event_signals_new_match() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "ERR one\nok\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("ERR").expect("filter");

        fs::write(&path, "ERR one\nok\nERR two\n").expect("append");
        tail.on_change_event(&ChangeEvent::new(watched(&tail)))
            .expect("refresh");

        assert_eq!(
            tail.presenter().last_lines(),
            lines(&[(1, "ERR one"), (3, "ERR two")])
        );
        assert_eq!(tail.presenter().matches, vec![LineRecord::new(3, "ERR two")]);
    }

    #[test]
    fn test_unchanged_refresh_does_not_signal() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "ERR one\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("ERR").expect("filter");

        tail.on_change_event(&ChangeEvent::new(watched(&tail)))
            .expect("refresh");

        assert!(tail.presenter().matches.is_empty());
    }

    #[test]
    fn test_manual_refresh_never_signals() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "ERR one\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("ERR").expect("filter");

        fs::write(&path, "ERR one\nERR two\n").expect("append");
        tail.manual_refresh().expect("refresh");

        assert!(tail.presenter().matches.is_empty());
        assert_eq!(tail.presenter().last_lines().len(), 2);
    }

    #[test]
    fn test_manual_refresh_is_repeatable() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "one\ntwo\n");
        let mut tail = controller();
        tail.open_file(&path).expect("open");

        tail.manual_refresh().expect("first");
        let first = tail.presenter().last_lines();
        tail.manual_refresh().expect("second");

        assert_eq!(tail.presenter().last_lines(), first);
    }

    #[test]
    fn test_change_event_for_other_file_is_ignored() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "x");
        let other = log_file(&dir, "other.log", "y");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        let published = tail.presenter().updates.len();

        tail.on_change_event(&ChangeEvent::new(other)).expect("ignored");

        assert_eq!(tail.presenter().updates.len(), published);
    }

    #[test]
    fn test_change_event_while_idle_is_ignored() {
        let mut tail = controller();
        tail.on_change_event(&ChangeEvent::new(Utf8PathBuf::from("/x.log")))
            .expect("ignored");
        assert!(tail.presenter().updates.is_empty());
    }

    #[test]
    fn test_manual_refresh_while_idle() {
        let mut tail = controller();
        assert!(matches!(tail.manual_refresh(), Err(TailError::NoFileOpen)));
    }

    #[test]
    fn test_close_publishes_empty_view() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "x");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        tail.set_filter("x").expect("filter");

        tail.close();

        assert_eq!(tail.state(), TailState::Idle);
        assert!(tail.target().is_none());
        assert!(!tail.filter().is_active());
        let update = tail.presenter().updates.last().expect("update");
        assert!(update.is_closed());
        assert!(update.lines.is_empty());
    }

    #[test]
    fn test_reopen_yields_identical_lines() {
        let dir = TempDir::new().expect("temp dir");
        let path = log_file(&dir, "app.log", "1\n2\n3");
        let mut tail = controller();
        tail.open_file(&path).expect("open");
        let first = tail.visible().to_vec();

        tail.close();
        tail.open_file(&path).expect("reopen");

        assert_eq!(tail.visible().to_vec(), first);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let dir = TempDir::new().expect("temp dir");
        let first = log_file(&dir, "first.log", "first");
        let second = log_file(&dir, "second.log", "second");
        let mut tail = controller();
        tail.open_file(&first).expect("open");
        let ticket = tail.begin_refresh().expect("ticket");
        assert_eq!(ticket.path(), first.as_path());

        tail.open_file(&second).expect("open second");
        let published = tail.presenter().updates.len();
        let applied = tail
            .complete_refresh(&ticket, Ok(b"stale".to_vec()), RefreshCause::Change)
            .expect("no error");

        assert!(!applied);
        assert_eq!(tail.presenter().updates.len(), published);
        assert_eq!(tail.visible().to_vec(), vec![LineRecord::new(1, "second")]);
    }

    #[test]
    fn test_open_clears_filter() {
        let dir = TempDir::new().expect("temp dir");
        let first = log_file(&dir, "first.log", "a");
        let second = log_file(&dir, "second.log", "b");
        let mut tail = controller();
        tail.open_file(&first).expect("open");
        tail.set_filter("a").expect("filter");

        tail.open_file(&second).expect("open second");

        assert_eq!(tail.state(), TailState::Watching);
        assert!(!tail.filter().is_active());
    }

    #[test]
    fn test_chosen_file_none_is_noop() {
        let mut tail = controller();
        tail.submit_chosen_file(None).expect("noop");
        assert_eq!(tail.state(), TailState::Idle);
        assert!(tail.presenter().updates.is_empty());
    }
}

//! End-to-end tests: real files, the real observer, and the worker loop.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use lw_core::{Config, LineRecord};
use lw_tail::{ChannelPresenter, ContentUpdate, StatusLevel, TailHandle, TailService, TailUpdate};
use lw_watcher::EventQueue;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

struct Harness {
    _dir: TempDir,
    path: Utf8PathBuf,
    handle: TailHandle,
    updates: EventQueue<TailUpdate>,
    worker: JoinHandle<()>,
}

impl Harness {
    fn start(content: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("app.log")).expect("utf-8");
        fs::write(&path, content).expect("write log");

        let (presenter, updates) = ChannelPresenter::channel();
        let (handle, service) = TailService::new(&Config::default(), presenter);
        let worker = service.spawn();
        Self {
            _dir: dir,
            path,
            handle,
            updates,
            worker,
        }
    }

    fn append(&self, text: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("open for append");
        file.write_all(text.as_bytes()).expect("append");
        file.sync_all().expect("sync");
    }

    async fn next(&mut self) -> TailUpdate {
        timeout(WAIT, self.updates.recv())
            .await
            .expect("timed out waiting for update")
            .expect("worker dropped presenter")
    }

    async fn next_content(&mut self) -> ContentUpdate {
        loop {
            if let TailUpdate::Content(update) = self.next().await {
                return update;
            }
        }
    }

    async fn next_status(&mut self) -> (StatusLevel, String) {
        loop {
            if let TailUpdate::Status(level, message) = self.next().await {
                return (level, message);
            }
        }
    }

    async fn content_until(&mut self, pred: impl Fn(&ContentUpdate) -> bool) -> ContentUpdate {
        loop {
            let update = self.next_content().await;
            if pred(&update) {
                return update;
            }
        }
    }

    async fn stop(self) {
        self.handle.shutdown();
        timeout(WAIT, self.worker)
            .await
            .expect("worker did not stop")
            .expect("worker panicked");
    }
}

fn pairs(update: &ContentUpdate) -> Vec<(usize, String)> {
    update
        .lines
        .iter()
        .map(|line| (line.number, line.text.clone()))
        .collect()
}

#[tokio::test]
async fn test_open_publishes_all_lines() {
    let mut h = Harness::start("a\nb\nc\n");
    h.handle.open_file(h.path.clone()).expect("send");

    let update = h.next_content().await;
    assert_eq!(
        pairs(&update),
        vec![
            (1, "a".to_owned()),
            (2, "b".to_owned()),
            (3, "c".to_owned()),
            (4, String::new()),
        ]
    );
    h.stop().await;
}

#[tokio::test]
async fn test_filter_and_status() {
    let mut h = Harness::start("a\nb\nc\n");
    h.handle.open_file(h.path.clone()).expect("send");
    h.handle.set_filter("b").expect("send");

    let update = h.content_until(|u| u.pattern.is_some()).await;
    assert_eq!(pairs(&update), vec![(2, "b".to_owned())]);
    let status = h.next_status().await;
    assert_eq!(status, (StatusLevel::Info, "Matched 1 occurences!".to_owned()));
    h.stop().await;
}

#[tokio::test]
async fn test_invalid_pattern_reports_error() {
    let mut h = Harness::start("a\n");
    h.handle.open_file(h.path.clone()).expect("send");
    let _ = h.next_content().await;
    let _ = h.next_status().await;

    h.handle.set_filter("(").expect("send");
    let (level, message) = h.next_status().await;
    assert_eq!(level, StatusLevel::Error);
    assert!(message.starts_with("Error: invalid pattern"), "{message}");
    h.stop().await;
}

#[tokio::test]
async fn test_appended_match_is_published_and_signalled() {
    let mut h = Harness::start("ERR first\nok\n");
    h.handle.open_file(h.path.clone()).expect("send");
    h.handle.set_filter("ERR").expect("send");
    let _ = h.content_until(|u| u.pattern.is_some()).await;

    h.append("ERR second\n");

    let mut signalled = None;
    while signalled.is_none() {
        if let TailUpdate::NewMatch(line) = h.next().await {
            signalled = Some(line);
        }
    }
    assert_eq!(signalled, Some(LineRecord::new(3, "ERR second")));
    h.stop().await;
}

#[tokio::test]
async fn test_burst_of_writes_settles_on_final_content() {
    let mut h = Harness::start("");
    h.handle.open_file(h.path.clone()).expect("send");
    let _ = h.next_content().await;

    for i in 1..=5 {
        h.append(&format!("line {i}\n"));
    }

    let update = h
        .content_until(|u| u.lines.iter().any(|l| l.text == "line 5"))
        .await;
    let texts: Vec<&str> = update.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["line 1", "line 2", "line 3", "line 4", "line 5", ""]);
    h.stop().await;
}

#[tokio::test]
async fn test_truncate_and_rewrite_is_a_refresh() {
    let mut h = Harness::start("old 1\nold 2\n");
    h.handle.open_file(h.path.clone()).expect("send");
    let _ = h.next_content().await;

    fs::write(&h.path, "new\n").expect("rewrite");

    let update = h
        .content_until(|u| u.lines.iter().any(|l| l.text == "new"))
        .await;
    assert_eq!(pairs(&update), vec![(1, "new".to_owned()), (2, String::new())]);
    h.stop().await;
}

#[tokio::test]
async fn test_close_then_commands_are_still_accepted() {
    let mut h = Harness::start("x\n");
    h.handle.open_file(h.path.clone()).expect("send");
    let _ = h.next_content().await;

    h.handle.close().expect("send");
    let closed = h.content_until(ContentUpdate::is_closed).await;
    assert!(closed.lines.is_empty());

    h.handle.refresh().expect("send");
    let (level, message) = h.next_status().await;
    assert_eq!(level, StatusLevel::Error);
    assert_eq!(message, "Error: no file is open");
    h.stop().await;
}

#[tokio::test]
async fn test_handle_fails_after_shutdown() {
    let h = Harness::start("");
    let handle = h.handle.clone();
    h.stop().await;
    assert!(handle.refresh().is_err());
}

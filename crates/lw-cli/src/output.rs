//! Plain-text and JSON rendering for the headless commands.

use std::io::{self, Write};

use lw_content::{FullLineSet, VisibleLineSet};
use lw_core::LineRecord;
use lw_tail::TailUpdate;
use serde::Serialize;

/// Writes every visible line behind a right-aligned number gutter.
pub fn write_numbered(lines: &VisibleLineSet, out: &mut impl Write) -> io::Result<()> {
    let width = lines.gutter_width();
    for line in lines.iter() {
        writeln!(out, "{:>width$} {}", line.number, line.text)?;
    }
    Ok(())
}

/// JSON document produced by `logwatch show --format json`.
#[derive(Debug, Serialize)]
pub struct ShowReport<'a> {
    /// File that was read.
    pub path: &'a str,
    /// Active pattern, if any.
    pub pattern: Option<&'a str>,
    /// Line count of the whole file.
    pub total_lines: usize,
    /// Visible lines with their original numbers.
    pub lines: Vec<LineRecord>,
}

impl<'a> ShowReport<'a> {
    /// Builds a report from the visible set.
    pub fn new(path: &'a str, pattern: Option<&'a str>, lines: &VisibleLineSet) -> Self {
        Self {
            path,
            pattern,
            total_lines: lines.source().len(),
            lines: lines.to_vec(),
        }
    }
}

/// Number of lines worth printing: the empty record after a final line
/// break is not a line yet.
fn settled_count(lines: &FullLineSet) -> usize {
    match lines.as_slice().last() {
        Some(last) if last.text.is_empty() => lines.len() - 1,
        _ => lines.len(),
    }
}

/// Prints only the lines a follow session has not printed yet.
///
/// Tracks the settled line count of the last update. A shorter file means
/// it was truncated, so printing starts over.
#[derive(Debug, Default)]
pub struct FollowPrinter {
    watermark: usize,
    started: bool,
}

impl FollowPrinter {
    /// Returns `true` once a content update has been printed.
    pub const fn started(&self) -> bool {
        self.started
    }

    /// Writes new lines to `out` and status text or notices to `err`.
    pub fn write_update(
        &mut self,
        update: &TailUpdate,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> io::Result<()> {
        match update {
            TailUpdate::Content(content) => {
                if content.is_closed() {
                    return Ok(());
                }
                let settled = settled_count(content.lines.source());
                if settled < self.watermark {
                    writeln!(err, "-- file truncated, starting over --")?;
                    self.watermark = 0;
                }
                for line in content
                    .lines
                    .iter()
                    .filter(|l| l.number > self.watermark && l.number <= settled)
                {
                    writeln!(out, "{}: {}", line.number, line.text)?;
                }
                self.watermark = settled;
                self.started = true;
            }
            TailUpdate::Status(_, text) => writeln!(err, "{text}")?,
            TailUpdate::NewMatch(line) => {
                writeln!(err, "-- new match on line {} --", line.number)?;
            }
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lw_content::PatternFilter;
    use lw_core::WatchTarget;
    use lw_tail::{ContentUpdate, StatusLevel};

    fn content(text: &str, pattern: Option<&str>) -> TailUpdate {
        let source = FullLineSet::from_text(text);
        let lines = match pattern {
            Some(raw) => {
                let compiled = PatternFilter::default().compile(raw).expect("valid pattern");
                VisibleLineSet::filtered(source, &compiled)
            }
            None => VisibleLineSet::unfiltered(source),
        };
        TailUpdate::Content(ContentUpdate {
            target: Some(WatchTarget::new("/tmp/app.log", "/tmp")),
            lines,
            highlights: lw_core::fx_hash_map(),
            pattern: pattern.map(ToOwned::to_owned),
        })
    }

    fn run(printer: &mut FollowPrinter, update: &TailUpdate) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        printer
            .write_update(update, &mut out, &mut err)
            .expect("write to vec");
        (
            String::from_utf8(out).expect("utf-8"),
            String::from_utf8(err).expect("utf-8"),
        )
    }

    #[test]
    fn test_write_numbered_pads_gutter() {
        let text = (1..=10).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let lines = VisibleLineSet::unfiltered(FullLineSet::from_text(&text));
        let mut out = Vec::new();
        write_numbered(&lines, &mut out).expect("write");
        let out = String::from_utf8(out).expect("utf-8");
        let rendered: Vec<&str> = out.lines().collect();
        assert_eq!(rendered[0], " 1 line 1");
        assert_eq!(rendered[9], "10 line 10");
    }

    #[test]
    fn test_show_report_json() {
        let compiled = PatternFilter::default().compile("ERR").expect("valid pattern");
        let lines = VisibleLineSet::filtered(FullLineSet::from_text("ok\nERR a\nok"), &compiled);
        let report = ShowReport::new("/tmp/app.log", Some("ERR"), &lines);
        let json = serde_json::to_string(&report).expect("serialize");
        insta::assert_snapshot!(json, @r#"{"path":"/tmp/app.log","pattern":"ERR","total_lines":3,"lines":[{"number":2,"text":"ERR a"}]}"#);
    }

    #[test]
    fn test_follow_prints_only_new_lines() {
        let mut printer = FollowPrinter::default();
        assert!(!printer.started());

        let (out, _) = run(&mut printer, &content("a\nb", None));
        assert_eq!(out, "1: a\n2: b\n");
        assert!(printer.started());

        let (out, _) = run(&mut printer, &content("a\nb\nc", None));
        assert_eq!(out, "3: c\n");
    }

    #[test]
    fn test_follow_waits_for_line_break() {
        let mut printer = FollowPrinter::default();
        let (out, _) = run(&mut printer, &content("a\nb\n", None));
        assert_eq!(out, "1: a\n2: b\n");

        let (out, _) = run(&mut printer, &content("a\nb\nc\n", None));
        assert_eq!(out, "3: c\n");

        let (out, _) = run(&mut printer, &content("a\nb\nc\n", None));
        assert!(out.is_empty());
    }

    #[test]
    fn test_follow_filtered_skips_old_matches() {
        let mut printer = FollowPrinter::default();
        run(&mut printer, &content("ERR 1\nok", Some("ERR")));
        let (out, err) = run(&mut printer, &content("ERR 1\nok\nok\nERR 4", Some("ERR")));
        assert_eq!(out, "4: ERR 4\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_follow_restarts_after_truncation() {
        let mut printer = FollowPrinter::default();
        run(&mut printer, &content("a\nb\nc", None));
        let (out, err) = run(&mut printer, &content("x", None));
        assert_eq!(out, "1: x\n");
        assert_eq!(err, "-- file truncated, starting over --\n");
    }

    #[test]
    fn test_follow_status_and_notice_go_to_err() {
        let mut printer = FollowPrinter::default();
        let (out, err) = run(
            &mut printer,
            &TailUpdate::Status(StatusLevel::Info, "Matched 2 occurences!".to_owned()),
        );
        assert!(out.is_empty());
        assert_eq!(err, "Matched 2 occurences!\n");

        let (_, err) = run(&mut printer, &TailUpdate::NewMatch(LineRecord::new(9, "ERR")));
        assert_eq!(err, "-- new match on line 9 --\n");
    }
}

// tests/poll_recovery.rs
//
// Poll loop against a scripted status source: full runs, interrupts, and the
// stats/snapshot path that follows them.
//
use std::time::Duration;

use case_watch::poll::{self, CancelToken, PollOutcome, PollSession, StatusSource};
use case_watch::progress::{NullProgress, Progress};
use case_watch::{stats, store, Status};
use tempfile::TempDir;

/// Cycles through a fixed script and cancels after `cancel_after` fetches.
struct Scripted {
    script: Vec<Status>,
    calls: usize,
    cancel_after: Option<(usize, CancelToken)>,
}

impl Scripted {
    fn new(script: Vec<Status>) -> Self {
        Self { script, calls: 0, cancel_after: None }
    }

    fn cancelling(mut self, after: usize, token: &CancelToken) -> Self {
        self.cancel_after = Some((after, token.clone()));
        self
    }
}

impl StatusSource for Scripted {
    fn fetch(&mut self, _receipt: &str) -> Status {
        let s = self.script[self.calls % self.script.len()];
        self.calls += 1;
        if let Some((after, token)) = &self.cancel_after {
            if self.calls == *after {
                token.cancel();
            }
        }
        s
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    ids: Vec<u32>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn item_done(&mut self, id: u32, _receipt: &str) {
        self.ids.push(id);
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn full_poll_fills_range_in_order() {
    let script = vec![Status::Received, Status::Approved, Status::Unknown];
    let mut src = Scripted::new(script.clone());
    let mut session = PollSession::new(197_000, 197_010);
    let mut progress = Recorder::default();

    let out = poll::poll(&mut session, &mut src, Duration::ZERO, &CancelToken::new(), &mut progress);

    assert_eq!(out, PollOutcome::Completed);
    assert_eq!(session.results.len(), 10);
    assert_eq!(session.effective_end(), 197_010);
    assert!(session.is_complete());
    for (i, s) in session.results.iter().enumerate() {
        assert_eq!(*s, script[i % 3], "id {}", 197_000 + i);
    }
    assert_eq!(progress.total, 10);
    assert_eq!(progress.ids, (197_000..197_010).collect::<Vec<_>>());
    assert!(progress.finished);
}

#[test]
fn interrupt_after_seven_of_twenty() {
    let cancel = CancelToken::new();
    let mut src = Scripted::new(vec![Status::Mailed]).cancelling(7, &cancel);
    let mut session = PollSession::new(100, 120);

    // long wait: the cancel must cut the delay short
    let out = poll::poll(&mut session, &mut src, Duration::from_secs(60), &cancel, &mut NullProgress);

    assert_eq!(out, PollOutcome::Interrupted);
    assert_eq!(src.calls, 7);
    assert_eq!(session.effective_end() - session.start, 7);
    assert_eq!(session.completed().len(), 7);
    assert!(!session.is_complete());
}

#[test]
fn interrupted_run_reports_partial_range() {
    let cancel = CancelToken::new();
    let mut src = Scripted::new(vec![Status::Received, Status::Delivered]).cancelling(7, &cancel);
    let mut session = PollSession::new(100, 120);
    poll::poll(&mut session, &mut src, Duration::ZERO, &cancel, &mut NullProgress);

    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();
    let saved = stats::report(
        dir.path(),
        session.start,
        session.effective_end(),
        true,
        session.completed(),
        &mut out,
    )
    .unwrap()
    .expect("snapshot path");

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Unprocessed: 4"));
    assert!(text.contains("Delivered: 3"));

    let snap = store::load(&saved).unwrap();
    assert_eq!((snap.start, snap.end), (100, 107));
    assert_eq!(snap.statuses, session.completed());
}

#[test]
fn report_without_persist_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();
    let saved = stats::report(dir.path(), 0, 0, false, &[], &mut out).unwrap();
    assert!(saved.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().filter(|l| l.ends_with(": 0")).count(), 7);
}

#[test]
fn failed_fetches_do_not_stop_the_loop() {
    // every fetch "fails" (Unknown); the loop still covers the whole range
    let mut src = |_: &str| Status::Unknown;
    let mut session = PollSession::new(5, 9);
    let out = poll::poll(&mut session, &mut src, Duration::ZERO, &CancelToken::new(), &mut NullProgress);
    assert_eq!(out, PollOutcome::Completed);
    assert_eq!(session.results, vec![Status::Unknown; 4]);
}

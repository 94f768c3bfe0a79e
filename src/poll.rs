// src/poll.rs
//! Sequential range polling with interrupt recovery.
//!
//! One request per id, in ascending order, with a fixed courtesy delay in
//! between. A [`CancelToken`] is checked before each id and wakes the delay
//! early, so Ctrl-C lands between iterations and never mid-append. Whatever
//! was recorded up to that point is kept in the [`PollSession`] and can be
//! reported as a shorter range.

use std::{
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

use crate::{config::consts::receipt_number, progress::Progress, status::Status};

/// Upper bound on the up-front `results` allocation; larger ranges grow as they fill.
const PREALLOC_LIMIT: usize = 1 << 16;

/// Anything that can turn a receipt number into a status.
/// Implementations absorb their own failures as `Status::Unknown`.
pub trait StatusSource {
    fn fetch(&mut self, receipt: &str) -> Status;
}

impl<F: FnMut(&str) -> Status> StatusSource for F {
    fn fetch(&mut self, receipt: &str) -> Status {
        self(receipt)
    }
}

/// State of one poll run over `[start, end)`.
#[derive(Clone, Debug)]
pub struct PollSession {
    pub start: u32,
    pub end: u32,
    /// `results[i]` is the status of id `start + i`.
    pub results: Vec<Status>,
    /// Next id to process; `checkpoint - start` ids are done.
    pub checkpoint: u32,
}

impl PollSession {
    pub fn new(start: u32, end: u32) -> Self {
        let end = end.max(start);
        Self {
            start,
            end,
            results: Vec::with_capacity(((end - start) as usize).min(PREALLOC_LIMIT)),
            checkpoint: start,
        }
    }

    fn record(&mut self, status: Status) {
        self.results.push(status);
        self.checkpoint += 1;
    }

    /// End of the recoverable range: never past what was actually appended,
    /// never past the checkpoint.
    pub fn effective_end(&self) -> u32 {
        let done = self.checkpoint.saturating_sub(self.start) as usize;
        self.start + self.results.len().min(done) as u32
    }

    /// Results for `[start, effective_end())`.
    pub fn completed(&self) -> &[Status] {
        &self.results[..(self.effective_end() - self.start) as usize]
    }

    pub fn is_complete(&self) -> bool {
        self.effective_end() == self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Completed,
    Interrupted,
}

/// Cooperative cancellation shared between the poll loop and a signal handler.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (flag, cv) = &*self.inner;
        if let Ok(mut cancelled) = flag.lock() {
            *cancelled = true;
        }
        cv.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        // poisoned means a holder panicked; treat as cancelled
        self.inner.0.lock().map(|c| *c).unwrap_or(true)
    }

    /// Block for `dur` unless cancelled first.
    /// Returns `true` if the full delay elapsed, `false` on cancellation.
    pub fn sleep(&self, dur: Duration) -> bool {
        let (flag, cv) = &*self.inner;
        let deadline = Instant::now() + dur;
        let Ok(mut cancelled) = flag.lock() else { return false };
        loop {
            if *cancelled {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            match cv.wait_timeout(cancelled, deadline - now) {
                Ok((guard, _)) => cancelled = guard,
                Err(_) => return false,
            }
        }
    }
}

/// Poll every id left in `session`, in order, recording one status per id.
///
/// Stops early with [`PollOutcome::Interrupted`] once `cancel` fires; the
/// session then holds exactly the ids processed so far.
pub fn poll(
    session: &mut PollSession,
    source: &mut dyn StatusSource,
    wait: Duration,
    cancel: &CancelToken,
    progress: &mut dyn Progress,
) -> PollOutcome {
    progress.begin((session.end - session.checkpoint) as usize);
    logf!("Polling {}..{} ({} ms between requests)", session.checkpoint, session.end, wait.as_millis());

    let outcome = loop {
        if session.checkpoint >= session.end {
            break PollOutcome::Completed;
        }
        if cancel.is_cancelled() {
            break PollOutcome::Interrupted;
        }

        let id = session.checkpoint;
        let receipt = receipt_number(id);
        let status = source.fetch(&receipt);
        session.record(status);
        progress.item_done(id, &receipt);

        if session.checkpoint < session.end && !cancel.sleep(wait) {
            break PollOutcome::Interrupted;
        }
    };

    progress.finish();
    if outcome == PollOutcome::Interrupted {
        logf!(
            "Interrupted after {} of {} ids",
            session.effective_end() - session.start,
            session.end - session.start
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use std::thread;

    #[test]
    fn effective_end_is_bounded_by_results() {
        let mut s = PollSession::new(100, 120);
        s.results = vec![Status::Received; 5];
        s.checkpoint = 106; // bumped, but the sixth append never happened
        assert_eq!(s.effective_end(), 105);
        assert_eq!(s.completed().len(), 5);
    }

    #[test]
    fn effective_end_is_bounded_by_checkpoint() {
        let mut s = PollSession::new(100, 120);
        s.results = vec![Status::Received; 5];
        s.checkpoint = 104; // appended, not yet counted
        assert_eq!(s.effective_end(), 104);
        assert_eq!(s.completed().len(), 4);
    }

    #[test]
    fn huge_range_does_not_preallocate_it_all() {
        let s = PollSession::new(0, u32::MAX);
        assert_eq!(s.end, u32::MAX);
        assert!(s.results.capacity() <= PREALLOC_LIMIT);
        assert!(!s.is_complete());
    }

    #[test]
    fn inverted_range_is_empty() {
        let s = PollSession::new(10, 5);
        assert_eq!(s.end, 10);
        assert!(s.is_complete());
        assert!(s.completed().is_empty());
    }

    #[test]
    fn sleep_runs_to_completion_when_not_cancelled() {
        let t = CancelToken::new();
        assert!(t.sleep(Duration::from_millis(5)));
        assert!(t.sleep(Duration::ZERO));
    }

    #[test]
    fn cancel_wakes_sleep() {
        let t = CancelToken::new();
        let t2 = t.clone();
        let h = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            t2.cancel();
        });
        let began = Instant::now();
        assert!(!t.sleep(Duration::from_secs(30)));
        assert!(began.elapsed() < Duration::from_secs(10));
        assert!(t.is_cancelled());
        h.join().unwrap();
    }

    #[test]
    fn already_cancelled_polls_nothing() {
        let t = CancelToken::new();
        t.cancel();
        let mut s = PollSession::new(0, 3);
        let mut calls = 0;
        let mut src = |_: &str| {
            calls += 1;
            Status::Received
        };
        let out = poll(&mut s, &mut src, Duration::ZERO, &t, &mut NullProgress);
        assert_eq!(out, PollOutcome::Interrupted);
        assert_eq!(calls, 0);
        assert_eq!(s.effective_end(), 0);
    }

    #[test]
    fn receipts_use_prefix() {
        let mut seen = Vec::new();
        let mut src = |r: &str| {
            seen.push(r.to_string());
            Status::Unknown
        };
        let mut s = PollSession::new(190_000, 190_002);
        poll(&mut s, &mut src, Duration::ZERO, &CancelToken::new(), &mut NullProgress);
        assert_eq!(seen, vec!["YSC1990190000", "YSC1990190001"]);
    }
}

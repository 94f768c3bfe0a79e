// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Everything a poll run needs, resolved from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct PollOptions {
    pub start: u32,
    pub count: u32,
    /// Courtesy delay between requests, in seconds.
    pub wait: f64,
    /// Persist a snapshot before printing stats.
    pub save: bool,
    /// Where snapshots are written.
    pub out_dir: PathBuf,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_RANGE,
            count: DEFAULT_NUM_ELTS,
            wait: DEFAULT_WAIT_SECS,
            save: false,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl PollOptions {
    /// Exclusive end of the polled range. Saturates instead of wrapping.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.count)
    }

    /// Exclusive end, or `None` when `start + count` does not fit a receipt id.
    pub fn checked_end(&self) -> Option<u32> {
        self.start.checked_add(self.count)
    }

    /// Negative or non-finite waits collapse to zero.
    pub fn wait_duration(&self) -> Duration {
        if self.wait.is_finite() && self.wait > 0.0 {
            Duration::from_secs_f64(self.wait)
        } else {
            Duration::ZERO
        }
    }
}

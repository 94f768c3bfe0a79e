// src/stats.rs
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{
    config::consts::STATS_DATE_PATTERN,
    error::SnapshotError,
    status::Status,
    store,
};

/// Per-status case counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub received: usize,
    pub new_card: usize,
    pub approved: usize,
    pub mailed: usize,
    pub delivered: usize,
    pub usps_picked: usize,
    pub unknown: usize,
}

impl Stats {
    pub fn tally(statuses: &[Status]) -> Self {
        let mut s = Stats::default();
        for status in statuses {
            *s.slot(*status) += 1;
        }
        s
    }

    fn slot(&mut self, status: Status) -> &mut usize {
        match status {
            Status::Received => &mut self.received,
            Status::NewCard => &mut self.new_card,
            Status::Approved => &mut self.approved,
            Status::Mailed => &mut self.mailed,
            Status::Delivered => &mut self.delivered,
            Status::UspsPicked => &mut self.usps_picked,
            Status::Unknown => &mut self.unknown,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Received => self.received,
            Status::NewCard => self.new_card,
            Status::Approved => self.approved,
            Status::Mailed => self.mailed,
            Status::Delivered => self.delivered,
            Status::UspsPicked => self.usps_picked,
            Status::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        Status::ALL.iter().map(|s| self.count(*s)).sum()
    }

    /// Display order and labels of the summary block.
    pub fn lines(&self) -> [(&'static str, usize); 7] {
        [
            ("Unprocessed", self.received),
            ("New Card", self.new_card),
            ("Approved", self.approved),
            ("Mailed", self.mailed),
            ("Delivered", self.delivered),
            ("Picked By USPS", self.usps_picked),
            ("Unknown", self.unknown),
        ]
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "***** Stats *****")?;
        writeln!(w, "Date: {}", Local::now().format(STATS_DATE_PATTERN))?;
        for (label, n) in self.lines() {
            writeln!(w, "{label}: {n}")?;
        }
        Ok(())
    }
}

/// Save a snapshot of `[start, end)` if `persist`, then print the summary.
/// The summary is printed even when the save failed; the save error is
/// returned after it. Returns the snapshot path when one was written.
pub fn report<W: Write>(
    out_dir: &Path,
    start: u32,
    end: u32,
    persist: bool,
    statuses: &[Status],
    w: W,
) -> Result<Option<PathBuf>, SnapshotError> {
    let saved = persist.then(|| store::save(out_dir, start, end, statuses));

    Stats::tally(statuses)
        .write_to(w)
        .map_err(|e| SnapshotError::io("<stdout>", e))?;

    saved.transpose()
}

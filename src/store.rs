// src/store.rs
//! Snapshot persistence.
//!
//! A snapshot file is one header line followed by `id, STATUS` rows, one per
//! case id, ascending and contiguous. Files are named after the local time of
//! the save so that a directory listing sorts chronologically.
//!
//! Ranges are end-exclusive everywhere: a snapshot loaded from rows
//! `100..=102` has `start = 100`, `end = 103`, same as the poll that made it.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{
    config::consts::{SNAPSHOT_FILE_PATTERN, SNAPSHOT_HEADER, SNAPSHOT_SEP},
    csv::{data_lines, parse_line, write_row},
    error::SnapshotError,
    status::Status,
};

/// Statuses for a contiguous id range at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Column heading used by the comparison report.
    pub label: String,
    pub start: u32,
    /// Exclusive.
    pub end: u32,
    pub statuses: Vec<Status>,
}

impl Snapshot {
    /// `end` saturates at `u32::MAX`; [`parse`] rejects ranges that would need more.
    pub fn new(label: impl Into<String>, start: u32, statuses: Vec<Status>) -> Self {
        let len = u32::try_from(statuses.len()).unwrap_or(u32::MAX);
        let end = start.saturating_add(len);
        Self { label: label.into(), start, end, statuses }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn min_id(&self) -> u32 {
        self.start
    }

    /// Last id present (inclusive).
    pub fn max_id(&self) -> u32 {
        self.end.saturating_sub(1)
    }

    /// `(id, status)` pairs in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, Status)> + '_ {
        (self.start..).zip(self.statuses.iter().copied())
    }
}

/// Write `statuses` for `[start, end)` to a new timestamp-named file in `dir`.
/// Returns the path written.
pub fn save(dir: &Path, start: u32, end: u32, statuses: &[Status]) -> Result<PathBuf, SnapshotError> {
    let expected = end.saturating_sub(start) as usize;
    if expected != statuses.len() {
        return Err(SnapshotError::LengthMismatch {
            start,
            end,
            expected,
            actual: statuses.len(),
        });
    }

    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|e| SnapshotError::io(dir, e))?;
    }
    let path = dir.join(Local::now().format(SNAPSHOT_FILE_PATTERN).to_string());

    write_snapshot(&path, start, statuses).map_err(|e| SnapshotError::io(&path, e))?;
    logf!("Saved {} cases to {}", statuses.len(), path.display());
    Ok(path)
}

fn write_snapshot(path: &Path, start: u32, statuses: &[Status]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    writeln!(out, "{SNAPSHOT_HEADER}")?;
    for (id, status) in (start..).zip(statuses) {
        write_row(&mut out, &[id.to_string().as_str(), status.as_str()], SNAPSHOT_SEP)?;
    }
    out.flush()
}

/// Read a snapshot written by [`save`].
pub fn load(path: &Path) -> Result<Snapshot, SnapshotError> {
    let text = fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
    let mut snap = parse(path, &text)?;
    snap.label = snapshot_label(path);
    logd!("Loaded {} cases ({}..{}) from {}", snap.len(), snap.start, snap.end, path.display());
    Ok(snap)
}

/// Parse snapshot text. `path` is only used for error messages.
pub fn parse(path: &Path, text: &str) -> Result<Snapshot, SnapshotError> {
    let mut start: Option<u32> = None;
    let mut statuses = Vec::new();

    // first line is the header, whatever it says
    for (line_no, line) in data_lines(text, 1) {
        let cells = parse_line(line, SNAPSHOT_SEP);
        if cells.len() != 2 {
            return Err(SnapshotError::format(
                path,
                line_no,
                format!("expected 2 columns, found {}", cells.len()),
            ));
        }

        let id: u32 = cells[0].parse().map_err(|_| {
            SnapshotError::format(path, line_no, format!("bad receipt id {:?}", cells[0]))
        })?;

        let first = *start.get_or_insert(id);
        let expected = first as u64 + statuses.len() as u64;
        if id as u64 != expected {
            return Err(SnapshotError::format(
                path,
                line_no,
                format!("expected id {expected}, found {id}; rows must be ascending with no gaps"),
            ));
        }

        // exclusive end must still fit
        if id == u32::MAX {
            return Err(SnapshotError::format(path, line_no, "id range overflows"));
        }

        statuses.push(Status::from_csv_token(&cells[1]));
    }

    let start = start.ok_or_else(|| SnapshotError::Empty(path.to_path_buf()))?;
    Ok(Snapshot::new(path.display().to_string(), start, statuses))
}

/// Human label for a snapshot file: `2019-Jun-07-10-30-00.csv` → `Jun 07, 2019`.
/// Names that don't look like a timestamp are returned as-is.
pub fn snapshot_label(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let stem = name.strip_suffix(".csv").unwrap_or(&name);

    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() <= 2 {
        return name;
    }
    format!("{} {}, {}", parts[1], parts[2], parts[0])
}

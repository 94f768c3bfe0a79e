// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced while saving, loading or comparing snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {reason}", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{}: no case rows found", .0.display())]
    Empty(PathBuf),

    #[error("range {start}..{end} holds {expected} ids but {actual} statuses were given")]
    LengthMismatch {
        start: u32,
        end: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Specify at least 2 files for comparison (got {0}).")]
    TooFewSnapshots(usize),

    #[error("The files are not comparable: {left} vs {right}")]
    NotComparable { left: String, right: String },
}

impl SnapshotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SnapshotError::Io { path: path.into(), source }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        SnapshotError::Format { path: path.into(), line, reason: reason.into() }
    }
}

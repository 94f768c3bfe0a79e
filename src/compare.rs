// src/compare.rs
//! Multi-snapshot diff.
//!
//! Snapshots are aligned by position: comparable snapshots cover the same
//! contiguous id range, so index `i` is the same case in each of them. For
//! every case the report keeps the full chain of distinct consecutive
//! statuses (`RECEIVED --> APPROVED --> MAILED`); cases that never changed
//! are left out.

use std::fmt;

use crate::{
    config::consts::receipt_number,
    error::SnapshotError,
    status::Status,
    store::Snapshot,
};

/// Same first id, same last id, same number of cases.
pub fn are_comparable(a: &Snapshot, b: &Snapshot) -> bool {
    a.min_id() == b.min_id() && a.max_id() == b.max_id() && a.len() == b.len()
}

/// One case whose status moved at least once across the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseChange {
    pub id: u32,
    /// Initial status followed by each status that differs from its predecessor.
    pub chain: Vec<Status>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    /// One label per snapshot, oldest first.
    pub labels: Vec<String>,
    pub changes: Vec<CaseChange>,
}

/// Diff an ordered chain of snapshots (oldest first).
pub fn compare(snapshots: &[Snapshot]) -> Result<ComparisonReport, SnapshotError> {
    if snapshots.len() < 2 {
        return Err(SnapshotError::TooFewSnapshots(snapshots.len()));
    }
    if let Some(pair) = snapshots.windows(2).find(|w| !are_comparable(&w[0], &w[1])) {
        return Err(SnapshotError::NotComparable {
            left: describe(&pair[0]),
            right: describe(&pair[1]),
        });
    }

    let first = &snapshots[0];
    let changes = first
        .entries()
        .enumerate()
        .filter_map(|(i, (id, initial))| {
            let mut chain = vec![initial];
            for snap in &snapshots[1..] {
                let s = snap.statuses[i];
                if chain.last() != Some(&s) {
                    chain.push(s);
                }
            }
            (chain.len() > 1).then_some(CaseChange { id, chain })
        })
        .collect();

    Ok(ComparisonReport {
        labels: snapshots.iter().map(|s| s.label.clone()).collect(),
        changes,
    })
}

fn describe(s: &Snapshot) -> String {
    format!("{} ({}..={}, {} cases)", s.label, s.min_id(), s.max_id(), s.len())
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<16}", "App #")?;
        for label in &self.labels {
            write!(f, "  {label:<16}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(16 + 18 * self.labels.len()))?;

        for change in &self.changes {
            write!(f, "{:<13} : ", receipt_number(change.id))?;
            for (i, status) in change.chain.iter().enumerate() {
                if i > 0 {
                    write!(f, " --> ")?;
                }
                write!(f, "{status:<11}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Status::*;

    fn snap(label: &str, start: u32, s: &[Status]) -> Snapshot {
        Snapshot::new(label, start, s.to_vec())
    }

    #[test]
    fn comparable_is_symmetric() {
        let a = snap("a", 100, &[Received; 3]);
        let b = snap("b", 100, &[Approved; 3]);
        let c = snap("c", 101, &[Approved; 3]);
        let d = snap("d", 100, &[Approved; 4]);
        for (x, y, want) in [(&a, &b, true), (&a, &c, false), (&a, &d, false), (&c, &d, false)] {
            assert_eq!(are_comparable(x, y), want);
            assert_eq!(are_comparable(y, x), want);
        }
    }

    #[test]
    fn keeps_full_chain() {
        let report = compare(&[
            snap("1", 5, &[Received, Received]),
            snap("2", 5, &[Approved, Received]),
            snap("3", 5, &[Approved, Received]),
            snap("4", 5, &[Mailed, Received]),
        ])
        .unwrap();
        assert_eq!(report.changes, vec![CaseChange { id: 5, chain: vec![Received, Approved, Mailed] }]);
    }

    #[test]
    fn flip_back_counts_as_change() {
        let report = compare(&[
            snap("1", 0, &[Received]),
            snap("2", 0, &[Unknown]),
            snap("3", 0, &[Received]),
        ])
        .unwrap();
        assert_eq!(report.changes[0].chain, vec![Received, Unknown, Received]);
    }

    #[test]
    fn too_few() {
        assert!(matches!(compare(&[]), Err(SnapshotError::TooFewSnapshots(0))));
        assert!(matches!(
            compare(&[snap("a", 1, &[Received])]),
            Err(SnapshotError::TooFewSnapshots(1))
        ));
    }

    #[test]
    fn any_bad_pair_aborts() {
        let err = compare(&[
            snap("a", 100, &[Received; 3]),
            snap("b", 100, &[Received; 3]),
            snap("c", 100, &[Received; 2]),
        ])
        .unwrap_err();
        match err {
            SnapshotError::NotComparable { left, right } => {
                assert!(left.starts_with("b "));
                assert!(right.starts_with("c "));
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn renders_rows() {
        let report = compare(&[snap("Jun 01, 2019", 7, &[Received]), snap("Jun 08, 2019", 7, &[Approved])]).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("App #"));
        assert!(lines[0].contains("Jun 01, 2019"));
        assert!(lines[0].contains("Jun 08, 2019"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].trim_end(), "YSC19907      : RECEIVED    --> APPROVED");
        assert_eq!(lines.len(), 3);
    }
}

//! Progress aggregation over a cycle's ledger

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ledger::{LedgerEntry, TaskStatus};

/// Roll-up of a ledger: counts by status, bugs, and completion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    /// Only statuses that occur; unrecognized values keep their literal key
    pub counts_by_status: BTreeMap<String, usize>,
    pub bug_count: usize,
    /// Percentage of done entries, one decimal, rounded half-up
    pub percent_complete: f64,
}

impl Summary {
    pub fn count(&self, status: &TaskStatus) -> usize {
        self.counts_by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    /// Counts with every recognized status present, zero-filled
    pub fn counts_with_defaults(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = TaskStatus::RECOGNIZED
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for (status, n) in &self.counts_by_status {
            counts.insert(status.clone(), *n);
        }
        counts
    }
}

pub fn summarize(entries: &[LedgerEntry]) -> Summary {
    let mut counts_by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut bug_count = 0;
    let mut complete = 0;

    for entry in entries {
        *counts_by_status.entry(entry.status.as_str().to_string()).or_default() += 1;
        if entry.has_bug() {
            bug_count += 1;
        }
        if entry.status.is_complete() {
            complete += 1;
        }
    }

    Summary {
        total: entries.len(),
        counts_by_status,
        bug_count,
        percent_complete: percent_one_decimal(complete, entries.len()),
    }
}

/// `100 * part / total` to one decimal, half-up, in integer tenths
fn percent_one_decimal(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let part = part as u64;
    let total = total as u64;
    let tenths = (2000 * part + total) / (2 * total);
    tenths as f64 / 10.0
}

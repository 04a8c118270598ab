//! # Result Ledger
//!
//! Ordered, append-only record of the outcomes of the current (or most recent) batch job.
//! Entries become visible to readers the moment they are appended. The ledger is emptied
//! only when a new batch job is confirmed.

use crate::models::{AttributeKind, EntryStatus, Record, RecordId, ResultEntry, RowStatus};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Success and error counts of a ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Shared handle to the ledger; clones observe the same entries
#[derive(Debug, Clone, Default)]
pub struct ResultLedger {
    entries: Arc<RwLock<Vec<ResultEntry>>>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, entry: ResultEntry) {
        self.entries.write().push(entry);
    }

    pub fn summary(&self) -> BatchSummary {
        self.entries
            .read()
            .iter()
            .fold(BatchSummary::default(), |mut summary, entry| {
                match entry.status {
                    EntryStatus::Success => summary.succeeded += 1,
                    EntryStatus::Error => summary.failed += 1,
                }
                summary
            })
    }

    /// Most recent entry for the `(record_id, kind)` pair
    pub fn find_latest(&self, record_id: RecordId, kind: AttributeKind) -> Option<ResultEntry> {
        self.entries
            .read()
            .iter()
            .rev()
            .find(|entry| entry.record_id == record_id && entry.kind == kind)
            .cloned()
    }

    /// Status to render next to `record` for the given attribute
    pub fn row_status(&self, record: &Record, kind: AttributeKind) -> RowStatus {
        match self.find_latest(record.id, kind) {
            Some(entry) if entry.is_success() => RowStatus::Success,
            Some(_) => RowStatus::Error,
            None if record.is_satisfied(kind) => RowStatus::Existing,
            None => RowStatus::Missing,
        }
    }

    /// Snapshot of every entry in append order
    pub fn entries(&self) -> Vec<ResultEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub(crate) fn reset(&self) {
        self.entries.write().clear();
    }
}

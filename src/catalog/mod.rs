//! # Record Catalog Cache
//!
//! Holds the latest known snapshot of candidate records. The snapshot is an immutable
//! `Arc<Vec<Record>>` swapped wholesale on `load()` and copied-on-write when a generated
//! value is applied, so views handed to renderers never observe a half-applied refresh.

pub mod view;

pub use view::{CatalogView, ViewIter};

use crate::collaborator::{CandidateFilter, CandidateSource};
use crate::logging::log_error;
use crate::models::{AttributeKind, Record, RecordId};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The data source failed; the previous snapshot is still in place
    #[error("Failed to load candidates: {reason}")]
    FetchFailed { reason: String },
}

/// Cache of candidate records for one target attribute
#[derive(Debug)]
pub struct RecordCatalog {
    target: AttributeKind,
    snapshot: RwLock<Arc<Vec<Record>>>,
    loaded_at: RwLock<Option<DateTime<Utc>>>,
}

impl RecordCatalog {
    pub fn new(target: AttributeKind) -> Self {
        Self::with_records(target, Vec::new())
    }

    /// Catalog pre-seeded with a snapshot, without going through a data source
    pub fn with_records(target: AttributeKind, records: Vec<Record>) -> Self {
        Self {
            target,
            snapshot: RwLock::new(Arc::new(records)),
            loaded_at: RwLock::new(None),
        }
    }

    /// Attribute that `filter(.., only_missing = true)` checks
    pub fn target_kind(&self) -> AttributeKind {
        self.target
    }

    /// Replace the cache with a fresh snapshot from `source`.
    ///
    /// On failure the current snapshot is kept untouched and the error is returned.
    #[instrument(skip(self, source), fields(target = %self.target))]
    pub async fn load(
        &self,
        source: &dyn CandidateSource,
        filter: &CandidateFilter,
    ) -> Result<usize, CatalogError> {
        let records = match source.fetch_candidates(filter).await {
            Ok(records) => records,
            Err(err) => {
                log_error("catalog", "load", &err.to_string(), None);
                return Err(CatalogError::FetchFailed {
                    reason: err.message(),
                });
            }
        };

        let count = records.len();
        *self.snapshot.write() = Arc::new(records);
        *self.loaded_at.write() = Some(Utc::now());
        info!(count, "Catalog snapshot replaced");
        Ok(count)
    }

    /// Set the generated value on the matching record.
    ///
    /// Returns `false`, without error, when the id is not in the current snapshot (a
    /// concurrent refresh may have dropped it).
    pub fn apply_generated(&self, id: RecordId, kind: AttributeKind, value: &str) -> bool {
        let mut guard = self.snapshot.write();
        let Some(position) = guard.iter().position(|record| record.id == id) else {
            debug!(record_id = %id, "Generated value for record outside snapshot ignored");
            return false;
        };
        Arc::make_mut(&mut *guard)[position].set_generated(kind, value);
        true
    }

    /// Lazy, restartable view matching `query` (case-insensitive, on name or SKU),
    /// optionally restricted to records still missing the target attribute
    pub fn filter(&self, query: &str, only_missing: bool) -> CatalogView {
        CatalogView::new(self.snapshot(), self.target, query, only_missing)
    }

    pub fn snapshot(&self) -> Arc<Vec<Record>> {
        Arc::clone(&*self.snapshot.read())
    }

    pub fn get(&self, id: RecordId) -> Option<Record> {
        self.snapshot.read().iter().find(|r| r.id == id).cloned()
    }

    /// Record identifiers in snapshot order
    pub fn ids(&self) -> Vec<RecordId> {
        self.snapshot.read().iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.read().is_empty()
    }

    /// When the last successful `load()` happened
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        *self.loaded_at.read()
    }
}

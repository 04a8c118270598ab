use super::record::{AttributeKind, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// An immutable, ordered list of record identifiers committed for sequential processing
/// under one operation kind.
///
/// Jobs are produced by the confirmation gate; later selection changes never reach a job
/// that already exists. A job never lists the same record twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    job_id: Uuid,
    kind: AttributeKind,
    record_ids: Vec<RecordId>,
    created_at: DateTime<Utc>,
}

impl BatchJob {
    /// Job over `record_ids` in the given order; repeated ids keep their first position
    pub fn new(kind: AttributeKind, record_ids: Vec<RecordId>) -> Self {
        let mut seen = HashSet::with_capacity(record_ids.len());
        let record_ids = record_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        Self {
            job_id: Uuid::new_v4(),
            kind,
            record_ids,
            created_at: Utc::now(),
        }
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn record_ids(&self) -> &[RecordId] {
        &self.record_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn len(&self) -> usize {
        self.record_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_ids.is_empty()
    }
}

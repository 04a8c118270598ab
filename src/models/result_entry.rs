use super::record::{AttributeKind, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one attempted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Success,
    Error,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One outcome recorded for a single record within a batch job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub record_id: RecordId,
    pub kind: AttributeKind,
    pub status: EntryStatus,
    /// Generated value, present on success
    pub value: Option<String>,
    /// Human-readable outcome or failure reason
    pub message: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl ResultEntry {
    pub fn success(
        record_id: RecordId,
        kind: AttributeKind,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id,
            kind,
            status: EntryStatus::Success,
            value: Some(value.into()),
            message: Some(message.into()),
            recorded_at: Utc::now(),
        }
    }

    pub fn error(record_id: RecordId, kind: AttributeKind, message: impl Into<String>) -> Self {
        Self {
            record_id,
            kind,
            status: EntryStatus::Error,
            value: None,
            message: Some(message.into()),
            recorded_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EntryStatus::Success
    }
}

/// Per-row status shown next to a catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Latest attempt in the current ledger succeeded
    Success,
    /// Latest attempt in the current ledger failed
    Error,
    /// Untouched by the current ledger but already carries the attribute
    Existing,
    /// Untouched by the current ledger and still missing the attribute
    Missing,
}

//! # Data Model
//!
//! Plain value types shared by every component of the engine: candidate records, committed
//! batch jobs and the result entries a run produces.

pub mod batch_job;
pub mod record;
pub mod result_entry;

// Re-export core models for easy access
pub use batch_job::BatchJob;
pub use record::{AttributeKind, Record, RecordId};
pub use result_entry::{EntryStatus, ResultEntry, RowStatus};

#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Stockmark Core
//!
//! Client-side orchestration engine for batch barcode and SKU generation.
//!
//! ## Overview
//!
//! Staff pick products that lack a barcode or SKU, confirm the operation, and the engine
//! asks the remote catalog service to generate the attribute for each product, strictly
//! one product at a time. Every outcome lands in an ordered ledger the moment it
//! resolves, and successful values are written back into the cached catalog so the
//! "missing" view shrinks as the batch progresses.
//!
//! ## Architecture
//!
//! ```text
//! CandidateSource ──load──▶ RecordCatalog ──filter──▶ CatalogView
//!                                │                         │
//!                                │                  SelectionSet
//!                                │                         │
//!                                │               ConfirmationGate ──confirm──▶ BatchJob
//!                                │                                               │
//!                     apply_generated ◀── BatchExecutor ◀──────────run───────────┘
//!                                              │      └──▶ AttributeGenerator
//!                                              ▼
//!                                         ResultLedger
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - The engine object owning every component
//! - [`catalog`] - Record catalog cache and filtered views
//! - [`selection`] - Selection set of record identifiers
//! - [`state_machine`] - Confirmation gate and executor/job states
//! - [`executor`] - Sequential batch executor
//! - [`ledger`] - Append-only result ledger
//! - [`collaborator`] - Remote collaborator traits and response normalization
//! - [`events`] - Broadcast lifecycle events
//! - [`config`] - Layered configuration
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

pub mod catalog;
pub mod collaborator;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod selection;
pub mod state_machine;

pub use catalog::{CatalogError, CatalogView, RecordCatalog};
pub use collaborator::{
    AttributeGenerator, CandidateFilter, CandidateSource, CollaboratorError, GeneratedAttribute,
};
pub use config::{ConfigManager, RegeneratePolicy, StockmarkConfig};
pub use engine::GenerationEngine;
pub use error::{Result, StockmarkError};
pub use events::{BatchEvent, EventPublisher};
pub use executor::{BatchExecutor, BatchReport, ExecutorError, RunReservation};
pub use ledger::{BatchSummary, ResultLedger};
pub use models::{AttributeKind, BatchJob, EntryStatus, Record, RecordId, ResultEntry, RowStatus};
pub use selection::SelectionSet;
pub use state_machine::{ConfirmationGate, ExecutorState, GateError, GateState, JobState};

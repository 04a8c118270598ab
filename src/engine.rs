//! # Generation Engine
//!
//! Owns the catalog, selection set, confirmation gate, result ledger and batch executor
//! behind one narrow interface:
//!
//! ```text
//! load ─▶ filter ─▶ toggle / select_all / clear ─▶ request_confirmation ─▶ confirm ─▶ run
//!                                                        └──▶ cancel
//! ```
//!
//! Every method takes `&self`, so an engine can sit behind an `Arc` and be observed by
//! renderers while a batch runs.
//!
//! A confirmed job is a one-shot token: `run` accepts only the job returned by the latest
//! `confirm`, and only once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockmark_core::collaborator::{AttributeGenerator, CandidateSource};
//! use stockmark_core::config::StockmarkConfig;
//! use stockmark_core::engine::GenerationEngine;
//! use stockmark_core::models::AttributeKind;
//!
//! # async fn example(
//! #     source: Arc<dyn CandidateSource>,
//! #     generator: Arc<dyn AttributeGenerator>,
//! # ) -> stockmark_core::Result<()> {
//! let engine = GenerationEngine::new(&StockmarkConfig::default(), source, generator);
//! engine.load(None, true).await?;
//! engine.select_all(&engine.filter("", true));
//! engine.request_confirmation(AttributeKind::Barcode)?;
//! let report = engine.confirm_and_run().await?;
//! println!("{} generated, {} failed", report.summary.succeeded, report.summary.failed);
//! # Ok(())
//! # }
//! ```

use crate::catalog::{CatalogView, RecordCatalog};
use crate::collaborator::{AttributeGenerator, CandidateSource};
use crate::config::{CatalogConfig, StockmarkConfig};
use crate::error::Result;
use crate::events::EventPublisher;
use crate::executor::{BatchExecutor, BatchReport, ExecutorError};
use crate::ledger::ResultLedger;
use crate::models::{AttributeKind, BatchJob, Record, RecordId, RowStatus};
use crate::selection::SelectionSet;
use crate::state_machine::{ConfirmationGate, ExecutorState, GateState};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument};

pub struct GenerationEngine {
    catalog: RecordCatalog,
    selection: Mutex<SelectionSet>,
    gate: Mutex<ConfirmationGate>,
    ledger: ResultLedger,
    executor: BatchExecutor,
    /// Confirmed job awaiting `run`; also serializes confirm against run start
    pending: Mutex<Option<BatchJob>>,
    source: Arc<dyn CandidateSource>,
    generator: Arc<dyn AttributeGenerator>,
    catalog_config: CatalogConfig,
}

impl GenerationEngine {
    /// Engine whose catalog targets the configured default kind
    pub fn new(
        config: &StockmarkConfig,
        source: Arc<dyn CandidateSource>,
        generator: Arc<dyn AttributeGenerator>,
    ) -> Self {
        Self::for_kind(config, config.engine.default_kind, source, generator)
    }

    /// Engine whose catalog "missing" filter targets `kind`
    pub fn for_kind(
        config: &StockmarkConfig,
        kind: AttributeKind,
        source: Arc<dyn CandidateSource>,
        generator: Arc<dyn AttributeGenerator>,
    ) -> Self {
        Self {
            catalog: RecordCatalog::new(kind),
            selection: Mutex::new(SelectionSet::new()),
            gate: Mutex::new(ConfirmationGate::new()),
            ledger: ResultLedger::new(),
            executor: BatchExecutor::new(&config.engine),
            pending: Mutex::new(None),
            source,
            generator,
            catalog_config: config.catalog.clone(),
        }
    }

    /// Refresh the catalog from the data source. The previous snapshot survives a failure.
    pub async fn load(&self, search: Option<&str>, only_missing: bool) -> Result<usize> {
        let filter =
            self.catalog_config
                .candidate_filter(self.catalog.target_kind(), search, only_missing);
        Ok(self.catalog.load(self.source.as_ref(), &filter).await?)
    }

    pub fn filter(&self, query: &str, only_missing: bool) -> CatalogView {
        self.catalog.filter(query, only_missing)
    }

    /// Flip selection of `id`; ids absent from the catalog are accepted and stay inert
    pub fn toggle(&self, id: RecordId) -> bool {
        self.selection.lock().toggle(id)
    }

    /// Replace the selection with the records of `view`
    pub fn select_all(&self, view: &CatalogView) {
        self.selection.lock().select_all(view.ids());
    }

    pub fn clear(&self) {
        self.selection.lock().clear();
    }

    /// Selected ids in insertion order
    pub fn selection(&self) -> Vec<RecordId> {
        self.selection.lock().ids().to_vec()
    }

    pub fn request_confirmation(&self, kind: AttributeKind) -> Result<GateState> {
        let selection = self.selection.lock();
        Ok(self.gate.lock().request_confirmation(kind, &selection)?)
    }

    /// Commit the selection into a batch job and empty the ledger for it.
    ///
    /// Rejected while a job is running, so the ledger of the running job is never reset
    /// underneath it. The returned job replaces any earlier confirmed job not yet run.
    pub fn confirm(&self) -> Result<BatchJob> {
        let mut pending = self.pending.lock();
        if let ExecutorState::Running { job_id, .. } = self.executor.state() {
            return Err(ExecutorError::AlreadyRunning { job_id }.into());
        }

        let job = {
            let selection = self.selection.lock();
            self.gate.lock().confirm(&selection, &self.catalog.ids())?
        };
        self.ledger.reset();
        *pending = Some(job.clone());
        info!(job_id = %job.job_id(), kind = %job.kind(), total = job.len(), "Batch job confirmed");
        Ok(job)
    }

    pub fn cancel(&self) -> Result<()> {
        Ok(self.gate.lock().cancel()?)
    }

    /// Run the pending confirmed job against the engine's generator, catalog and ledger.
    ///
    /// Rejected with [`ExecutorError::AlreadyRunning`] while a job is in flight and with
    /// [`ExecutorError::NotConfirmed`] for any job other than the pending one, including a
    /// job that already ran.
    #[instrument(skip_all, fields(job_id = %job.job_id()))]
    pub async fn run(&self, job: &BatchJob) -> Result<BatchReport> {
        let (reservation, job) = {
            let mut pending = self.pending.lock();
            if let ExecutorState::Running { job_id, .. } = self.executor.state() {
                return Err(ExecutorError::AlreadyRunning { job_id }.into());
            }
            match pending.take() {
                Some(confirmed) if confirmed.job_id() == job.job_id() => {
                    (self.executor.reserve(&confirmed)?, confirmed)
                }
                other => {
                    *pending = other;
                    return Err(ExecutorError::NotConfirmed {
                        job_id: job.job_id(),
                    }
                    .into());
                }
            }
        };

        Ok(self
            .executor
            .run_reserved(
                reservation,
                &job,
                self.generator.as_ref(),
                &self.catalog,
                &self.ledger,
            )
            .await?)
    }

    /// `confirm` followed by `run`
    pub async fn confirm_and_run(&self) -> Result<BatchReport> {
        let job = self.confirm()?;
        self.run(&job).await
    }

    /// Status to render next to a catalog record for `kind`
    pub fn row_status(&self, record: &Record, kind: AttributeKind) -> RowStatus {
        self.ledger.row_status(record, kind)
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.lock().state()
    }

    pub fn executor_state(&self) -> ExecutorState {
        self.executor.state()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<ExecutorState> {
        self.executor.subscribe_progress()
    }

    pub fn events(&self) -> &EventPublisher {
        self.executor.events()
    }

    pub fn catalog(&self) -> &RecordCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &ResultLedger {
        &self.ledger
    }
}

//! # Batch Executor
//!
//! Runs a committed [`BatchJob`] to completion, one record at a time.
//!
//! ## Guarantees
//!
//! - Strictly sequential: the generation call for item `k + 1` starts only after item `k`
//!   has been recorded in the ledger and, on success, applied to the catalog.
//! - Partial failure never aborts the batch: every collaborator failure (rejection,
//!   transport error, timeout, even a panic inside the collaborator) becomes an `error`
//!   entry and the loop moves on.
//! - The executor always returns to `Idle`, including when the run future is dropped.
//! - Only one job runs at a time; a second `run` is rejected without touching state.
//! - A job runs at most once per executor; re-running a started job is rejected, so its
//!   ledger entries are never duplicated.
//!
//! Progress is published on a `watch` channel ([`BatchExecutor::subscribe_progress`]) and
//! lifecycle events on the [`EventPublisher`].

use crate::catalog::RecordCatalog;
use crate::collaborator::{AttributeGenerator, CollaboratorError};
use crate::config::{EngineConfig, RegeneratePolicy};
use crate::events::{BatchEvent, EventPublisher};
use crate::ledger::{BatchSummary, ResultLedger};
use crate::logging::{log_batch_operation, log_item_operation};
use crate::models::{AttributeKind, BatchJob, RecordId, ResultEntry};
use crate::state_machine::{ExecutorState, JobState};
use futures::FutureExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    #[error("A batch job is already running ({job_id})")]
    AlreadyRunning { job_id: Uuid },

    #[error("Batch job {job_id} has already been run")]
    AlreadyExecuted { job_id: Uuid },

    #[error("Batch job {job_id} is not the pending confirmed job")]
    NotConfirmed { job_id: Uuid },

    #[error("Reservation for batch job {reserved} cannot run batch job {requested}")]
    ReservationMismatch { reserved: Uuid, requested: Uuid },
}

/// Final report of a completed batch job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub job_id: Uuid,
    pub kind: AttributeKind,
    pub state: JobState,
    /// Counts for this job only; always sums to the job length
    pub summary: BatchSummary,
}

/// Sequential batch executor
#[derive(Debug)]
pub struct BatchExecutor {
    state: watch::Sender<ExecutorState>,
    events: EventPublisher,
    policy: RegeneratePolicy,
    item_timeout: Option<Duration>,
    started: Mutex<HashSet<Uuid>>,
}

impl BatchExecutor {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_publisher(config, EventPublisher::new(config.event_channel_capacity))
    }

    pub fn with_publisher(config: &EngineConfig, events: EventPublisher) -> Self {
        let (state, _) = watch::channel(ExecutorState::Idle);
        Self {
            state,
            events,
            policy: config.regenerate_policy,
            item_timeout: config.item_timeout(),
            started: Mutex::new(HashSet::new()),
        }
    }

    pub fn state(&self) -> ExecutorState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// Receiver that observes every progress change ("index of total")
    pub fn subscribe_progress(&self) -> watch::Receiver<ExecutorState> {
        self.state.subscribe()
    }

    pub fn events(&self) -> &EventPublisher {
        &self.events
    }

    /// Run `job` to completion.
    ///
    /// Rejected with [`ExecutorError::AlreadyRunning`] when another job is in flight and
    /// with [`ExecutorError::AlreadyExecuted`] when `job` was started before. Otherwise
    /// every record is attempted exactly once, in job order, and the returned report's
    /// counts sum to the job length.
    pub async fn run(
        &self,
        job: &BatchJob,
        generator: &dyn AttributeGenerator,
        catalog: &RecordCatalog,
        ledger: &ResultLedger,
    ) -> Result<BatchReport, ExecutorError> {
        let reservation = self.reserve(job)?;
        self.run_reserved(reservation, job, generator, catalog, ledger).await
    }

    /// Move from idle to running for `job` without starting the loop.
    ///
    /// Lets a caller commit to a run while holding its own lock. Dropping the reservation
    /// returns the executor to `Idle`; the job still counts as started.
    pub fn reserve(&self, job: &BatchJob) -> Result<RunReservation<'_>, ExecutorError> {
        self.begin(job)
    }

    /// Run `job` under a reservation obtained from [`BatchExecutor::reserve`]
    #[instrument(skip_all, fields(job_id = %job.job_id(), kind = %job.kind(), total = job.len()))]
    pub async fn run_reserved(
        &self,
        reservation: RunReservation<'_>,
        job: &BatchJob,
        generator: &dyn AttributeGenerator,
        catalog: &RecordCatalog,
        ledger: &ResultLedger,
    ) -> Result<BatchReport, ExecutorError> {
        if reservation.job_id != job.job_id() {
            return Err(ExecutorError::ReservationMismatch {
                reserved: reservation.job_id,
                requested: job.job_id(),
            });
        }
        let _running = reservation;
        let job_id = job.job_id();
        let kind = job.kind();
        let total = job.len();

        log_batch_operation("run", job_id, &kind.to_string(), "started", None);
        self.events.publish(BatchEvent::JobStarted {
            job_id,
            kind,
            total,
        });

        let mut summary = BatchSummary::default();
        for (index, &record_id) in job.record_ids().iter().enumerate() {
            self.state.send_replace(ExecutorState::Running {
                job_id,
                index,
                total,
            });
            self.events.publish(BatchEvent::ItemStarted {
                job_id,
                index,
                total,
                record_id,
            });

            let entry = self.attempt(kind, record_id, generator, catalog).await;
            if entry.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }

            ledger.append(entry.clone());
            if let Some(value) = entry.value.as_deref().filter(|_| entry.is_success()) {
                catalog.apply_generated(record_id, kind, value);
            }

            log_item_operation(
                job_id,
                index,
                total,
                record_id.value(),
                &entry.status.to_string(),
                entry.message.as_deref(),
            );
            self.events.publish(BatchEvent::ItemResolved {
                job_id,
                index,
                entry,
            });

            // Let observers see this item's outcome before the next call starts
            tokio::task::yield_now().await;
        }

        let details = format!("{} succeeded / {} failed", summary.succeeded, summary.failed);
        log_batch_operation("run", job_id, &kind.to_string(), "completed", Some(&details));
        self.events.publish(BatchEvent::JobCompleted {
            job_id,
            kind,
            state: JobState::Completed,
            summary,
        });

        Ok(BatchReport {
            job_id,
            kind,
            state: JobState::Completed,
            summary,
        })
    }

    /// Atomically move from idle to running; the returned guard moves back on drop
    fn begin(&self, job: &BatchJob) -> Result<RunReservation<'_>, ExecutorError> {
        let mut started = self.started.lock();
        if started.contains(&job.job_id()) {
            warn!(job_id = %job.job_id(), "Batch job rejected; already run");
            return Err(ExecutorError::AlreadyExecuted {
                job_id: job.job_id(),
            });
        }

        let mut running_job = None;
        let moved = self.state.send_if_modified(|state| match *state {
            ExecutorState::Running { job_id, .. } => {
                running_job = Some(job_id);
                false
            }
            ExecutorState::Idle => {
                *state = ExecutorState::Running {
                    job_id: job.job_id(),
                    index: 0,
                    total: job.len(),
                };
                true
            }
        });

        match (moved, running_job) {
            (true, _) => {
                started.insert(job.job_id());
                Ok(RunReservation {
                    job_id: job.job_id(),
                    state: &self.state,
                })
            }
            (false, job_id) => {
                let job_id = job_id.unwrap_or_else(Uuid::nil);
                warn!(running = %job_id, rejected = %job.job_id(), "Batch job rejected; executor busy");
                Err(ExecutorError::AlreadyRunning { job_id })
            }
        }
    }

    /// One generation attempt, converted to a ledger entry whatever happens
    async fn attempt(
        &self,
        kind: AttributeKind,
        record_id: RecordId,
        generator: &dyn AttributeGenerator,
        catalog: &RecordCatalog,
    ) -> ResultEntry {
        if self.policy == RegeneratePolicy::SkipSatisfied
            && catalog
                .get(record_id)
                .is_some_and(|record| record.is_satisfied(kind))
        {
            return ResultEntry::error(record_id, kind, format!("Already has {}", kind.label()));
        }

        let call = AssertUnwindSafe(generator.generate_attribute(kind, record_id)).catch_unwind();
        let outcome = match self.item_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => Ok(Err(CollaboratorError::Timeout {
                    after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })),
            },
            None => call.await,
        };

        match outcome {
            Ok(Ok(generated)) => {
                ResultEntry::success(record_id, kind, generated.value, generated.message)
            }
            Ok(Err(err)) => {
                warn!(record_id = %record_id, error = %err, "Generation failed; continuing batch");
                ResultEntry::error(record_id, kind, err.message())
            }
            Err(_) => {
                warn!(record_id = %record_id, "Generation panicked; continuing batch");
                ResultEntry::error(record_id, kind, "Generation failed unexpectedly")
            }
        }
    }
}

/// Exclusive right to run one job; restores `Idle` when the run finishes, its future is
/// dropped, or the reservation is discarded unused
#[derive(Debug)]
pub struct RunReservation<'a> {
    job_id: Uuid,
    state: &'a watch::Sender<ExecutorState>,
}

impl RunReservation<'_> {
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }
}

impl Drop for RunReservation<'_> {
    fn drop(&mut self) {
        self.state.send_replace(ExecutorState::Idle);
    }
}

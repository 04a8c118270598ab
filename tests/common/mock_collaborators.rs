use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use stockmark_core::collaborator::{
    AttributeGenerator, CandidateFilter, CandidateSource, CollaboratorError, CollaboratorResult,
    GeneratedAttribute,
};
use stockmark_core::{AttributeKind, Record, RecordId};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Generation call observed by a [`ScriptedGenerator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockGeneration {
    pub kind: AttributeKind,
    pub record_id: RecordId,
}

/// Generator answering from a script; unscripted ids are rejected with "not found"
#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<HashMap<RecordId, CollaboratorResult<String>>>,
    calls: Mutex<Vec<MockGeneration>>,
    hold: Mutex<Option<Arc<Semaphore>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `id` with a generated value
    pub fn succeed(self, id: i64, value: &str) -> Self {
        self.script.lock().insert(RecordId(id), Ok(value.to_string()));
        self
    }

    /// Answer `id` with a rejection
    pub fn reject(self, id: i64, message: &str) -> Self {
        self.script
            .lock()
            .insert(RecordId(id), Err(CollaboratorError::Rejected(message.to_string())));
        self
    }

    /// Block every call until the returned semaphore hands out a permit (one per call)
    pub fn held(self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        *self.hold.lock() = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Wait until at least `count` calls have started
    pub async fn wait_for_calls(&self, count: usize) {
        while self.calls.lock().len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    pub fn calls(&self) -> Vec<MockGeneration> {
        self.calls.lock().clone()
    }

    pub fn called_ids(&self) -> Vec<RecordId> {
        self.calls.lock().iter().map(|call| call.record_id).collect()
    }
}

#[async_trait]
impl AttributeGenerator for ScriptedGenerator {
    async fn generate_attribute(
        &self,
        kind: AttributeKind,
        record_id: RecordId,
    ) -> CollaboratorResult<GeneratedAttribute> {
        self.calls.lock().push(MockGeneration { kind, record_id });

        let hold = self.hold.lock().clone();
        if let Some(gate) = hold {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let scripted = self.script.lock().get(&record_id).cloned();
        match scripted {
            Some(Ok(value)) => Ok(GeneratedAttribute::new(value)),
            Some(Err(err)) => Err(err),
            None => Err(CollaboratorError::Rejected("not found".to_string())),
        }
    }
}

/// Candidate source serving a fixed list, switchable to failure
pub struct StaticSource {
    records: Mutex<CollaboratorResult<Vec<Record>>>,
    fetches: Mutex<Vec<CandidateFilter>>,
}

impl StaticSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(Ok(records)),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn set_records(&self, records: Vec<Record>) {
        *self.records.lock() = Ok(records);
    }

    pub fn fail_with(&self, message: &str) {
        *self.records.lock() = Err(CollaboratorError::Transport(message.to_string()));
    }

    pub fn fetches(&self) -> Vec<CandidateFilter> {
        self.fetches.lock().clone()
    }
}

#[async_trait]
impl CandidateSource for StaticSource {
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> CollaboratorResult<Vec<Record>> {
        self.fetches.lock().push(filter.clone());
        self.records.lock().clone()
    }
}

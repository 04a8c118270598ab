use crate::ledger::BatchSummary;
use crate::models::{AttributeKind, RecordId, ResultEntry};
use crate::state_machine::JobState;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Lifecycle events of a batch job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEvent {
    JobStarted {
        job_id: Uuid,
        kind: AttributeKind,
        total: usize,
    },
    ItemStarted {
        job_id: Uuid,
        index: usize,
        total: usize,
        record_id: RecordId,
    },
    ItemResolved {
        job_id: Uuid,
        index: usize,
        entry: ResultEntry,
    },
    JobCompleted {
        job_id: Uuid,
        kind: AttributeKind,
        state: JobState,
        summary: BatchSummary,
    },
}

impl BatchEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::JobStarted { .. } => "job_started",
            Self::ItemStarted { .. } => "item_started",
            Self::ItemResolved { .. } => "item_resolved",
            Self::JobCompleted { .. } => "job_completed",
        }
    }

    pub fn job_id(&self) -> Uuid {
        match self {
            Self::JobStarted { job_id, .. }
            | Self::ItemStarted { job_id, .. }
            | Self::ItemResolved { job_id, .. }
            | Self::JobCompleted { job_id, .. } => *job_id,
        }
    }
}

/// Event that has been published
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub event: BatchEvent,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// Broadcast publisher for batch lifecycle events
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns how many subscribers received it.
    pub fn publish(&self, event: BatchEvent) -> usize {
        let published = PublishedEvent {
            event,
            published_at: chrono::Utc::now(),
        };

        // No subscribers is fine; events are fire-and-forget
        self.sender.send(published).unwrap_or(0)
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000) // Default capacity of 1000 events
    }
}

use crate::models::AttributeKind;
use serde::{Deserialize, Serialize};

/// Events that can trigger confirmation gate transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GateEvent {
    /// Open the confirmation for an operation kind
    RequestConfirmation(AttributeKind),
    /// Accept the pending operation and commit a batch job
    Confirm,
    /// Discard the pending operation
    Cancel,
}

impl GateEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RequestConfirmation(_) => "request_confirmation",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
        }
    }
}

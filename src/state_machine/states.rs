use crate::models::AttributeKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Confirmation gate states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "kind")]
pub enum GateState {
    /// No confirmation pending
    Idle,
    /// An operation kind was chosen and awaits the user's confirmation
    AwaitingConfirmation(AttributeKind),
}

impl GateState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation(_))
    }

    /// Operation kind awaiting confirmation, if any
    pub fn pending_kind(&self) -> Option<AttributeKind> {
        match self {
            Self::AwaitingConfirmation(kind) => Some(*kind),
            Self::Idle => None,
        }
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingConfirmation(kind) => write!(f, "awaiting_confirmation({kind})"),
        }
    }
}

/// Batch executor states.
///
/// `Running` carries the zero-based index of the item currently in flight, which is the
/// progress signal renderers show as "index + 1 of total".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ExecutorState {
    Idle,
    Running {
        job_id: Uuid,
        index: usize,
        total: usize,
    },
}

impl ExecutorState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Current progress as `(index, total)`; `None` when idle
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self {
            Self::Running { index, total, .. } => Some((*index, *total)),
            Self::Idle => None,
        }
    }
}

impl Default for ExecutorState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for ExecutorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running { index, total, .. } => write!(f, "running({} of {total})", index + 1),
        }
    }
}

/// Batch job lifecycle. There is no cancelled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Committed by the gate, not yet picked up
    Pending,
    /// One element is being processed
    Running,
    /// Every element has been attempted, whatever the individual outcomes
    Completed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_progress() {
        let state = ExecutorState::Running {
            job_id: Uuid::new_v4(),
            index: 2,
            total: 5,
        };
        assert!(state.is_running());
        assert_eq!(state.progress(), Some((2, 5)));
        assert_eq!(state.to_string(), "running(3 of 5)");
        assert_eq!(ExecutorState::Idle.progress(), None);
    }

    #[test]
    fn test_gate_state_pending_kind() {
        assert_eq!(GateState::Idle.pending_kind(), None);
        let state = GateState::AwaitingConfirmation(AttributeKind::Sku);
        assert!(state.is_awaiting());
        assert_eq!(state.pending_kind(), Some(AttributeKind::Sku));
        assert_eq!(state.to_string(), "awaiting_confirmation(sku)");
    }

    #[test]
    fn test_job_state_terminal_check() {
        assert!(JobState::Completed.is_terminal());
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::Running.is_terminal());
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&JobState::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let gate = serde_json::to_value(GateState::AwaitingConfirmation(AttributeKind::Barcode))
            .unwrap();
        assert_eq!(gate["state"], "awaiting_confirmation");
        assert_eq!(gate["kind"], "barcode");
    }
}

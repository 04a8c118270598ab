use thiserror::Error;

/// Rejections raised by the confirmation gate. A rejected event never changes state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Selection is empty; nothing to confirm")]
    EmptySelection,

    #[error("Invalid gate transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },
}

pub type GateResult<T> = Result<T, GateError>;

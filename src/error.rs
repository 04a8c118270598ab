//! Error types for the Stockmark engine.
//!
//! Each concern owns a focused error enum; [`StockmarkError`] folds them together for
//! callers that drive the engine end to end.

use crate::catalog::CatalogError;
use crate::collaborator::CollaboratorError;
use crate::config::ConfigurationError;
use crate::executor::ExecutorError;
use crate::state_machine::GateError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StockmarkError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Confirmation gate error: {0}")]
    Gate(#[from] GateError),
    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigurationError> for StockmarkError {
    fn from(error: ConfigurationError) -> Self {
        StockmarkError::Configuration(error.to_string())
    }
}

impl From<serde_json::Error> for StockmarkError {
    fn from(error: serde_json::Error) -> Self {
        StockmarkError::ValidationError(format!("JSON serialization error: {error}"))
    }
}

impl StockmarkError {
    /// Whether the error came from misusing the engine (a rejected transition) rather
    /// than from a collaborator or configuration fault.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            StockmarkError::Gate(_) | StockmarkError::Executor(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StockmarkError>;

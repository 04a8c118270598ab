//! # Collaborator Boundary
//!
//! The engine consumes two remote operations: fetching candidate records and generating a
//! single attribute for a single record. Both are expressed as async traits so the engine
//! never sees transport details.
//!
//! Remote responses arrive in several loose JSON envelopes. [`normalize`] maps every
//! accepted shape into the fixed [`Record`] / [`GeneratedAttribute`] model, and
//! [`EnvelopeClient`] wires a raw JSON transport through that normalization step.

pub mod envelope;
pub mod fallback;
pub mod normalize;

pub use envelope::{EnvelopeClient, RawGenerationApi};
pub use fallback::FallbackSource;

use crate::models::{AttributeKind, Record, RecordId};
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// Network or transport level failure
    #[error("Transport failure: {0}")]
    Transport(String),
    /// The provider refused the request (validation, conflict, unknown record)
    #[error("Request rejected: {0}")]
    Rejected(String),
    /// The response did not match any accepted envelope
    #[error("Unrecognized response: {0}")]
    Normalization(String),
    #[error("Timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}

impl CollaboratorError {
    /// Message suitable for a result entry, without the category prefix
    pub fn message(&self) -> String {
        match self {
            Self::Transport(msg) | Self::Rejected(msg) | Self::Normalization(msg) => msg.clone(),
            Self::Timeout { after_ms } => format!("Timed out after {after_ms}ms"),
        }
    }
}

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

/// Query parameters passed to the candidate data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFilter {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    /// Ask for records still missing `kind` only
    pub only_missing: bool,
    pub kind: AttributeKind,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 100,
            search: None,
            only_missing: true,
            kind: AttributeKind::default(),
        }
    }
}

/// Successful outcome of a single generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAttribute {
    pub value: String,
    pub message: String,
}

impl GeneratedAttribute {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            message: normalize::DEFAULT_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Supplies candidate records. Must return an empty list, not an error, when there are
/// simply no candidates.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> CollaboratorResult<Vec<Record>>;
}

/// Generates one attribute for one record. Called at most once per record per batch.
#[async_trait]
pub trait AttributeGenerator: Send + Sync {
    async fn generate_attribute(
        &self,
        kind: AttributeKind,
        record_id: RecordId,
    ) -> CollaboratorResult<GeneratedAttribute>;
}

/// Adapts a closure returning a boxed future into an [`AttributeGenerator`]
pub struct FnGenerator<F>(pub F);

#[async_trait]
impl<F> AttributeGenerator for FnGenerator<F>
where
    F: Fn(AttributeKind, RecordId) -> BoxFuture<'static, CollaboratorResult<GeneratedAttribute>>
        + Send
        + Sync,
{
    async fn generate_attribute(
        &self,
        kind: AttributeKind,
        record_id: RecordId,
    ) -> CollaboratorResult<GeneratedAttribute> {
        (self.0)(kind, record_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    #[test]
    fn test_error_message_strips_category() {
        let err = CollaboratorError::Rejected("not found".to_string());
        assert_eq!(err.message(), "not found");
        assert_eq!(err.to_string(), "Request rejected: not found");
        assert_eq!(
            CollaboratorError::Timeout { after_ms: 250 }.message(),
            "Timed out after 250ms"
        );
    }

    #[tokio::test]
    async fn test_fn_generator_delegates() {
        let generator = FnGenerator(|kind: AttributeKind, id: RecordId| {
            async move { Ok::<_, CollaboratorError>(GeneratedAttribute::new(format!("{kind}-{id}"))) }
                .boxed()
        });
        let generated = generator
            .generate_attribute(AttributeKind::Sku, RecordId(4))
            .await
            .unwrap();
        assert_eq!(generated.value, "sku-4");
        assert_eq!(generated.message, "Generated");
    }
}

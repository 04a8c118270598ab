use super::normalize::{generated_from_envelope, records_from_envelope};
use super::{
    AttributeGenerator, CandidateFilter, CandidateSource, CollaboratorResult, GeneratedAttribute,
};
use crate::models::{AttributeKind, Record, RecordId};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Raw JSON transport to the remote product API.
///
/// Implementations only move bytes; they never interpret the response shape.
#[async_trait]
pub trait RawGenerationApi: Send + Sync {
    /// Product listing for the given filter
    async fn list_products(&self, filter: &CandidateFilter) -> CollaboratorResult<Value>;

    /// Generation call for one record
    async fn generate(&self, kind: AttributeKind, record_id: RecordId) -> CollaboratorResult<Value>;
}

/// Typed collaborator over a [`RawGenerationApi`], normalizing every response
#[derive(Debug, Clone)]
pub struct EnvelopeClient<A> {
    api: A,
}

impl<A: RawGenerationApi> EnvelopeClient<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: RawGenerationApi> CandidateSource for EnvelopeClient<A> {
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> CollaboratorResult<Vec<Record>> {
        let body = self.api.list_products(filter).await?;
        let records = records_from_envelope(&body)?;
        debug!(count = records.len(), "Normalized candidate listing");
        Ok(records)
    }
}

#[async_trait]
impl<A: RawGenerationApi> AttributeGenerator for EnvelopeClient<A> {
    async fn generate_attribute(
        &self,
        kind: AttributeKind,
        record_id: RecordId,
    ) -> CollaboratorResult<GeneratedAttribute> {
        let body = self.api.generate(kind, record_id).await?;
        generated_from_envelope(kind, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::CollaboratorError;
    use serde_json::json;

    struct CannedApi;

    #[async_trait]
    impl RawGenerationApi for CannedApi {
        async fn list_products(&self, _filter: &CandidateFilter) -> CollaboratorResult<Value> {
            Ok(json!({"products": [{"id": 1, "name": "Gloves"}, {"id": 2, "sku": "SKU-2"}]}))
        }

        async fn generate(
            &self,
            kind: AttributeKind,
            record_id: RecordId,
        ) -> CollaboratorResult<Value> {
            match (kind, record_id.value()) {
                (AttributeKind::Sku, 1) => Ok(json!({"data": {"sku": "SKU-100"}})),
                (AttributeKind::Barcode, 1) => Ok(json!({"ok": true})),
                _ => Err(CollaboratorError::Rejected("not found".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_listing_is_normalized() {
        let client = EnvelopeClient::new(CannedApi);
        let records = client
            .fetch_candidates(&CandidateFilter::default())
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sku.as_deref(), Some("SKU-2"));
    }

    #[tokio::test]
    async fn test_generation_is_normalized() {
        let client = EnvelopeClient::new(CannedApi);
        let generated = client
            .generate_attribute(AttributeKind::Sku, RecordId(1))
            .await
            .unwrap();
        assert_eq!(generated.value, "SKU-100");

        let err = client
            .generate_attribute(AttributeKind::Barcode, RecordId(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Normalization(_)));

        let err = client
            .generate_attribute(AttributeKind::Sku, RecordId(3))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "not found");
    }
}

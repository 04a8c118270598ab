use super::{CandidateFilter, CandidateSource, CollaboratorResult};
use crate::models::Record;
use async_trait::async_trait;
use tracing::warn;

/// Serves "missing only" listings from a dedicated source, falling back to the general
/// listing when the dedicated source fails. Unfiltered listings always use the general one.
pub struct FallbackSource<M, G> {
    missing: M,
    general: G,
}

impl<M, G> FallbackSource<M, G>
where
    M: CandidateSource,
    G: CandidateSource,
{
    pub fn new(missing: M, general: G) -> Self {
        Self { missing, general }
    }
}

#[async_trait]
impl<M, G> CandidateSource for FallbackSource<M, G>
where
    M: CandidateSource,
    G: CandidateSource,
{
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> CollaboratorResult<Vec<Record>> {
        if !filter.only_missing {
            return self.general.fetch_candidates(filter).await;
        }

        match self.missing.fetch_candidates(filter).await {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(error = %err, "Missing-records listing failed; using general listing");
                self.general.fetch_candidates(filter).await
            }
        }
    }
}

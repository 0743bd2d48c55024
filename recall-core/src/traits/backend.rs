use async_trait::async_trait;

use crate::errors::RecallResult;
use crate::models::{BackendResult, SearchQuery};

/// Uniform contract over heterogeneous retrieval sources (lexical indices,
/// vector stores, tag-graph stores).
///
/// Adapters should prefer returning an empty list on internal error; the
/// orchestrator isolates failures regardless, so an `Err` here costs the
/// caller nothing beyond that backend's contribution.
#[async_trait]
pub trait MemoryBackend: Send + Sync {
    /// Registered name, used for selection and provenance.
    fn name(&self) -> &str;

    /// Search this source. Results use the backend's own score scale.
    async fn search(&self, query: &SearchQuery) -> RecallResult<Vec<BackendResult>>;
}

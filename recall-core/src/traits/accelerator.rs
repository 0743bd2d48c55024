use async_trait::async_trait;

use crate::errors::RecallResult;
use crate::models::{BackendResult, SearchQuery};

/// Optional native accelerator for three-phase retrieval.
///
/// Phases: *lens* derives focal tags from the query, *expand* walks the tag
/// association graph breadth-first up to `depth`, *focus* scores candidates
/// with a blended lexical/vector/tag weighting. Any phase may fail; the
/// strategy layer falls back to the baseline path for that call.
#[async_trait]
pub trait WaveAccelerator: Send + Sync {
    /// Whether the accelerated implementation is usable right now.
    async fn probe(&self) -> bool;

    async fn lens(&self, query: &SearchQuery) -> RecallResult<Vec<String>>;

    async fn expand(&self, focal_tags: &[String], depth: usize) -> RecallResult<Vec<String>>;

    async fn focus(
        &self,
        query: &SearchQuery,
        tags: &[String],
    ) -> RecallResult<Vec<BackendResult>>;
}

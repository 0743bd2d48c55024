//! Retrieval strategies.
//!
//! The baseline path is fan-out + fusion. The accelerated path drives an
//! optional native three-phase implementation behind the same contract, so a
//! fallback is invisible to callers: same `FusedResult` shape either way.

pub mod accelerated;
pub mod baseline;

pub use accelerated::AcceleratedStrategy;
pub use baseline::BaselineStrategy;

use std::sync::Arc;

use async_trait::async_trait;

use recall_core::models::{FusedResult, SearchQuery};
use recall_core::traits::MemoryBackend;

/// What a strategy produced, with enough provenance for outcome reporting.
#[derive(Debug, Default)]
pub struct StrategyOutcome {
    pub results: Vec<FusedResult>,
    pub responding_backends: Vec<String>,
    pub failed_backends: Vec<String>,
    /// True when the accelerated path was wanted but the baseline served.
    pub degraded: bool,
}

/// A way to turn a resolved query plus a backend set into fused results.
#[async_trait]
pub trait RetrievalStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn retrieve(
        &self,
        query: &SearchQuery,
        backends: &[Arc<dyn MemoryBackend>],
    ) -> StrategyOutcome;
}

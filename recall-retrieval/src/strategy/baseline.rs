//! Baseline strategy: concurrent fan-out, threshold filter, fusion.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use recall_core::models::{FusedResult, SearchQuery};
use recall_core::traits::MemoryBackend;

use crate::search::rrf_fusion::{self, FusionParams};
use crate::search::{filter_by_threshold, FanoutSearcher};

use super::{RetrievalStrategy, StrategyOutcome};

/// The always-available path: every selected backend, wait-all, RRF when more
/// than one backend contributed, otherwise a plain score sort.
pub struct BaselineStrategy {
    /// Content-prefix dedup length and normalization settings for fusion.
    pub dedup_prefix_chars: usize,
    pub normalize_scores: bool,
}

impl BaselineStrategy {
    pub fn new(dedup_prefix_chars: usize, normalize_scores: bool) -> Self {
        Self {
            dedup_prefix_chars,
            normalize_scores,
        }
    }
}

#[async_trait]
impl RetrievalStrategy for BaselineStrategy {
    fn name(&self) -> &str {
        "baseline"
    }

    async fn retrieve(
        &self,
        query: &SearchQuery,
        backends: &[Arc<dyn MemoryBackend>],
    ) -> StrategyOutcome {
        let fanout = FanoutSearcher::new(backends.to_vec()).search(query).await;
        let responding = fanout.responding;
        let failed = fanout.failed;

        let survivors = filter_by_threshold(fanout.results, query.threshold);

        let contributing: usize = {
            let mut names: Vec<&str> = survivors.iter().map(|r| r.backend.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            names.len()
        };

        // The engine truncates to top_k after outcome accounting; strategies
        // return the full survivor ranking.
        let results = if query.use_rrf && contributing > 1 {
            rrf_fusion::fuse(
                &survivors,
                &FusionParams {
                    k: query.rrf_k,
                    top_k: usize::MAX,
                    dedup_prefix_chars: self.dedup_prefix_chars,
                    normalize: self.normalize_scores,
                },
            )
        } else {
            // Single-source (or RRF disabled): plain score sort.
            let mut plain: Vec<FusedResult> = survivors
                .into_iter()
                .map(FusedResult::from_backend)
                .collect();
            plain.sort_by(|a, b| {
                b.fused_score
                    .partial_cmp(&a.fused_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            plain
        };

        debug!(
            results = results.len(),
            contributing, "baseline retrieval complete"
        );

        StrategyOutcome {
            results,
            responding_backends: responding,
            failed_backends: failed,
            degraded: false,
        }
    }
}

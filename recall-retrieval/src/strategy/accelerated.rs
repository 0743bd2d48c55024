//! Accelerated strategy: optional native three-phase retrieval with
//! transparent fallback.
//!
//! Phases: lens (focal tags) → expand (bounded graph walk) → focus (blended
//! scoring). Availability is probed per call; a missing accelerator, a failed
//! phase, or a blown deadline all route the call through the baseline path
//! under the exact same result contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, warn};

use recall_core::config::defaults::{DEFAULT_WAVE_EXPANSION_DEPTH, DEFAULT_WAVE_TIMEOUT_MS};
use recall_core::errors::RecallResult;
use recall_core::models::{FusedResult, SearchQuery};
use recall_core::traits::{MemoryBackend, WaveAccelerator};

use crate::search::filter_by_threshold;

use super::{BaselineStrategy, RetrievalStrategy, StrategyOutcome};

pub struct AcceleratedStrategy {
    accelerator: Arc<dyn WaveAccelerator>,
    baseline: BaselineStrategy,
    expansion_depth: usize,
    timeout_ms: u64,
}

impl AcceleratedStrategy {
    pub fn new(accelerator: Arc<dyn WaveAccelerator>, baseline: BaselineStrategy) -> Self {
        Self {
            accelerator,
            baseline,
            expansion_depth: DEFAULT_WAVE_EXPANSION_DEPTH,
            timeout_ms: DEFAULT_WAVE_TIMEOUT_MS,
        }
    }

    /// Run the three phases. Any error aborts the accelerated attempt.
    async fn run_phases(&self, query: &SearchQuery) -> RecallResult<Vec<FusedResult>> {
        let focal = self.accelerator.lens(query).await?;
        let expanded = self.accelerator.expand(&focal, self.expansion_depth).await?;

        let mut tags = focal;
        for tag in expanded {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let scored = self.accelerator.focus(query, &tags).await?;
        let survivors = filter_by_threshold(scored, query.threshold);

        let mut results: Vec<FusedResult> = survivors
            .into_iter()
            .map(FusedResult::from_backend)
            .collect();
        results.sort_by(|a, b| {
            b.fused_score
                .partial_cmp(&a.fused_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(results)
    }
}

#[async_trait]
impl RetrievalStrategy for AcceleratedStrategy {
    fn name(&self) -> &str {
        "wave"
    }

    async fn retrieve(
        &self,
        query: &SearchQuery,
        backends: &[Arc<dyn MemoryBackend>],
    ) -> StrategyOutcome {
        if self.accelerator.probe().await {
            let budget = Duration::from_millis(self.timeout_ms);
            match timeout(budget, self.run_phases(query)).await {
                Ok(Ok(results)) => {
                    debug!(results = results.len(), "accelerated retrieval complete");
                    return StrategyOutcome {
                        results,
                        responding_backends: vec![self.name().to_string()],
                        failed_backends: Vec::new(),
                        degraded: false,
                    };
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "accelerated phase failed, falling back");
                }
                Err(_) => {
                    warn!(budget_ms = self.timeout_ms, "accelerated path timed out, falling back");
                }
            }
        } else {
            debug!("accelerator unavailable, falling back");
        }

        let mut outcome = self.baseline.retrieve(query, backends).await;
        outcome.degraded = true;
        outcome
    }
}

//! FanoutSearcher: wait-all concurrent dispatch across backends.

pub mod rrf_fusion;

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use recall_core::models::{BackendResult, SearchQuery};
use recall_core::traits::MemoryBackend;

/// What came back from a fan-out, with per-backend provenance.
#[derive(Debug, Default)]
pub struct FanoutOutcome {
    /// All results, merged across backends, in backend dispatch order.
    pub results: Vec<BackendResult>,
    /// Backends that completed successfully.
    pub responding: Vec<String>,
    /// Backends that errored; their contribution is empty, never fatal.
    pub failed: Vec<String>,
}

/// Dispatches one query to every selected backend concurrently and waits for
/// all of them. Completeness beats latency here: a slow backend delays the
/// search rather than being silently dropped.
pub struct FanoutSearcher {
    backends: Vec<Arc<dyn MemoryBackend>>,
}

impl FanoutSearcher {
    pub fn new(backends: Vec<Arc<dyn MemoryBackend>>) -> Self {
        Self { backends }
    }

    /// Fan out to every backend and wait for all. Each call is independently
    /// fault-contained: an error yields an empty contribution and a warning.
    pub async fn search(&self, query: &SearchQuery) -> FanoutOutcome {
        let calls = self.backends.iter().map(|backend| {
            let backend = Arc::clone(backend);
            async move {
                let name = backend.name().to_string();
                let outcome = backend.search(query).await;
                (name, outcome)
            }
        });

        let mut fanout = FanoutOutcome::default();
        for (name, outcome) in join_all(calls).await {
            match outcome {
                Ok(results) => {
                    debug!(backend = %name, hits = results.len(), "backend responded");
                    fanout.responding.push(name);
                    fanout.results.extend(results);
                }
                Err(e) => {
                    warn!(backend = %name, error = %e, "backend failed, contributing nothing");
                    fanout.failed.push(name);
                }
            }
        }
        fanout
    }
}

/// Drop results below the score threshold. Runs before fusion so rank
/// positions are assigned only among survivors.
pub fn filter_by_threshold(results: Vec<BackendResult>, threshold: f64) -> Vec<BackendResult> {
    results
        .into_iter()
        .filter(|r| r.raw_score >= threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        let results = vec![
            BackendResult::new("a", "keep", 0.5, "lexical"),
            BackendResult::new("b", "drop", 0.49, "lexical"),
            BackendResult::new("c", "keep too", 0.9, "vector"),
        ];
        let kept = filter_by_threshold(results, 0.5);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.raw_score >= 0.5));
    }
}

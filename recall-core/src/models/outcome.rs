use serde::{Deserialize, Serialize};

/// Closed set of search outcome states.
///
/// Ordered by reporting precedence: when several apply, the engine reports
/// the earliest variant (a degraded strategy matters more than result-set
/// shape, which matters more than recency bias).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The accelerated strategy failed and the baseline path served the call.
    RagFallback,
    /// A stage was skipped (e.g. threshold filtering left nothing to fuse).
    Skipped,
    /// More candidates survived than `top_k`; the tail was cut.
    Truncated,
    /// A time window biased the ordering toward recent results.
    Recent,
    /// Nothing degraded, nothing cut.
    Full,
}

/// Per-call provenance for callers that need more than the result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Set when the LLM rerank stage degraded to the original ordering.
    pub rerank_fallback: bool,
    /// Backends that completed successfully.
    pub responding_backends: Vec<String>,
    /// Backends that errored and were treated as empty.
    pub failed_backends: Vec<String>,
    /// Whether the response was served from the result cache.
    pub cache_hit: bool,
    pub search_id: String,
}

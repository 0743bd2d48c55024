use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Backends dispatched when the caller does not name any, in priority order.
    pub default_backends: Vec<String>,
    /// Maximum results returned per search.
    pub top_k: usize,
    /// Minimum raw score a backend result needs to survive into fusion.
    pub threshold: f64,
    /// Fuse multi-backend results with RRF instead of a plain score sort.
    pub use_rrf: bool,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Divide fused scores by the maximum so the top result scores 1.0.
    pub normalize_scores: bool,
    /// Content-prefix length used as the cross-backend dedup key.
    pub dedup_prefix_chars: usize,
    /// Maximum tags extracted from a query.
    pub max_query_tags: usize,
    /// Enable query expansion by default.
    pub expand_query: bool,
    /// Maximum expanded terms merged from all expansion sources.
    pub max_expanded_terms: usize,
    /// How many co-occurrence associations to pull per query tag.
    pub association_top_k: usize,
    /// Weight multiplier applied to learner-supplied associations, in [0, 1].
    pub expansion_factor: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_backends: Vec::new(),
            top_k: defaults::DEFAULT_TOP_K,
            threshold: defaults::DEFAULT_THRESHOLD,
            use_rrf: defaults::DEFAULT_USE_RRF,
            rrf_k: defaults::DEFAULT_RRF_K,
            normalize_scores: defaults::DEFAULT_NORMALIZE_SCORES,
            dedup_prefix_chars: defaults::DEFAULT_DEDUP_PREFIX_CHARS,
            max_query_tags: defaults::DEFAULT_MAX_QUERY_TAGS,
            expand_query: false,
            max_expanded_terms: defaults::DEFAULT_MAX_EXPANDED_TERMS,
            association_top_k: defaults::DEFAULT_ASSOCIATION_TOP_K,
            expansion_factor: defaults::DEFAULT_EXPANSION_FACTOR,
        }
    }
}

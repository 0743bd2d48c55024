use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::rerank_config::RerankRuntimeConfig;

/// An inclusive time window resolved upstream from a time expression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t <= self.end
    }

    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + Duration::milliseconds((self.end - self.start).num_milliseconds() / 2)
    }

    /// Half the window span, in milliseconds. Zero for a degenerate window.
    pub fn half_span_ms(&self) -> i64 {
        (self.end - self.start).num_milliseconds() / 2
    }
}

/// Per-call search options. Every field is optional; unset fields fall back
/// to the configured defaults when the engine resolves the call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Backends to dispatch, by registered name. Empty = configured default set.
    pub backends: Vec<String>,
    pub top_k: Option<usize>,
    pub threshold: Option<f64>,
    pub use_rrf: Option<bool>,
    pub rrf_k: Option<u32>,
    /// Explicit tag boost. When unset, derived from learned tag weights.
    pub tag_boost: Option<f64>,
    pub time_range: Option<TimeWindow>,
    pub expand_query: Option<bool>,
    /// Restrict semantic-group expansion to these group names (exact or prefix).
    pub group_names: Vec<String>,
    /// Try the accelerated multi-phase strategy before the baseline path.
    pub use_wave_rag: bool,
    /// Consult the relevance learner for boosts and co-occurrence expansion.
    pub use_tag_memo: bool,
    pub use_rerank: bool,
    pub rerank_config: Option<RerankRuntimeConfig>,
    /// Learning mode: the query is recorded with the learner and the result
    /// cache is bypassed so stale ranks never pollute feedback attribution.
    pub learning_query: bool,
}

/// A fully resolved query, created per call and never persisted.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub text: String,
    /// Tags extracted from the text (bounded, case-normalized).
    pub tags: Vec<String>,
    /// Expansion terms merged from semantic groups and the co-occurrence graph.
    pub expanded_terms: Vec<String>,
    pub time_window: Option<TimeWindow>,
    pub backends: Vec<String>,
    pub top_k: usize,
    pub threshold: f64,
    pub use_rrf: bool,
    pub rrf_k: u32,
    pub tag_boost: f64,
}

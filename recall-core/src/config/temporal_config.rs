use serde::{Deserialize, Serialize};

use super::defaults;

/// Time-decay reranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Multiplier for results dated inside the query's time window.
    pub in_range_boost: f64,
    /// Fraction of `in_range_boost` lost at the window edges (midpoint keeps full boost).
    pub edge_falloff: f64,
    /// Exponential decay rate per day outside the window.
    pub decay_lambda: f64,
    /// When false, results outside the window keep their score unchanged.
    pub recency_boost: bool,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            in_range_boost: defaults::DEFAULT_IN_RANGE_BOOST,
            edge_falloff: defaults::DEFAULT_EDGE_FALLOFF,
            decay_lambda: defaults::DEFAULT_DECAY_LAMBDA,
            recency_boost: defaults::DEFAULT_RECENCY_BOOST,
        }
    }
}

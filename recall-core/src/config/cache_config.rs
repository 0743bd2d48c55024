use serde::{Deserialize, Serialize};

use super::defaults;

/// Cache configuration for the result cache and the rerank cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Result cache entry lifetime in seconds.
    pub result_ttl_secs: u64,
    /// Maximum result cache entries before oldest-first eviction.
    pub result_capacity: usize,
    /// Rerank cache entry lifetime in seconds.
    pub rerank_ttl_secs: u64,
    /// Maximum rerank cache entries.
    pub rerank_capacity: u64,
    /// Maximum tracked search sessions.
    pub max_sessions: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            result_ttl_secs: defaults::DEFAULT_RESULT_CACHE_TTL_SECS,
            result_capacity: defaults::DEFAULT_RESULT_CACHE_CAPACITY,
            rerank_ttl_secs: defaults::DEFAULT_RERANK_CACHE_TTL_SECS,
            rerank_capacity: defaults::DEFAULT_RERANK_CACHE_CAPACITY,
            max_sessions: defaults::DEFAULT_MAX_SESSIONS,
        }
    }
}

//! Configuration. Serde-deserializable with TOML loading; every field has a
//! default so a missing or partial file still yields a working config.

pub mod cache_config;
pub mod defaults;
pub mod rerank_config;
pub mod retrieval_config;
pub mod temporal_config;

pub use cache_config::CacheConfig;
pub use rerank_config::RerankRuntimeConfig;
pub use retrieval_config::RetrievalConfig;
pub use temporal_config::TemporalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{RecallError, RecallResult};

/// A named, curated set of related words used for query expansion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticGroup {
    /// Group identifier. Hierarchical names use prefixes, e.g. `emotion_positive`.
    pub name: String,
    pub words: Vec<String>,
}

/// Top-level configuration aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub retrieval: RetrievalConfig,
    pub temporal: TemporalConfig,
    pub cache: CacheConfig,
    pub rerank: RerankRuntimeConfig,
    /// Static semantic groups for query expansion.
    pub semantic_groups: Vec<SemanticGroup>,
}

impl RecallConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> RecallResult<Self> {
        toml::from_str(text).map_err(|e| RecallError::Config {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = RecallConfig::from_toml("").unwrap();
        assert_eq!(config.retrieval.rrf_k, defaults::DEFAULT_RRF_K);
        assert_eq!(config.cache.result_capacity, 100);
        assert!(config.semantic_groups.is_empty());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let text = r#"
            [retrieval]
            top_k = 25
            rrf_k = 30

            [[semantic_groups]]
            name = "learning"
            words = ["学习", "笔记", "知识"]
        "#;
        let config = RecallConfig::from_toml(text).unwrap();
        assert_eq!(config.retrieval.top_k, 25);
        assert_eq!(config.retrieval.rrf_k, 30);
        assert_eq!(config.retrieval.threshold, defaults::DEFAULT_THRESHOLD);
        assert_eq!(config.semantic_groups[0].words.len(), 3);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = RecallConfig::from_toml("retrieval = 3").unwrap_err();
        assert!(matches!(err, RecallError::Config { .. }));
    }
}

use serde::{Deserialize, Serialize};

use super::defaults;

/// LLM reranking stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankRuntimeConfig {
    /// Model identifier passed through to the chat model.
    pub model_id: Option<String>,
    /// Provider identifier passed through to the chat model.
    pub provider_id: Option<String>,
    /// Hard cap on documents sent to the model.
    pub max_documents: usize,
    /// Documents per model call.
    pub batch_size: usize,
    /// Wall-clock budget for the whole rerank stage.
    pub timeout_ms: u64,
}

impl Default for RerankRuntimeConfig {
    fn default() -> Self {
        Self {
            model_id: None,
            provider_id: None,
            max_documents: defaults::DEFAULT_RERANK_MAX_DOCUMENTS,
            batch_size: defaults::DEFAULT_RERANK_BATCH_SIZE,
            timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
        }
    }
}

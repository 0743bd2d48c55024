use async_trait::async_trait;

use crate::errors::RecallResult;

/// Minimal chat-completion seam for the LLM reranker.
///
/// One prompt in, one text completion out. Batching, JSON parsing, and
/// deadlines are the reranker's job, not the model adapter's.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, model_id: Option<&str>, prompt: &str) -> RecallResult<String>;
}

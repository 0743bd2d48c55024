/// LLM reranker errors.
///
/// These stay internal to the rerank stage: the pipeline converts every one
/// of them into a fallback ordering, never into a caller-visible failure.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("model call failed: {reason}")]
    ModelFailed { reason: String },

    #[error("batch response was not valid JSON: {reason}")]
    MalformedResponse { reason: String },

    #[error("rerank deadline of {budget_ms}ms exceeded")]
    DeadlineExceeded { budget_ms: u64 },
}

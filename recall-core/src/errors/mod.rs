//! Error taxonomy. One enum per subsystem, wrapped by `RecallError`.

mod rerank_error;
mod retrieval_error;

pub use rerank_error::RerankError;
pub use retrieval_error::RetrievalError;

/// Top-level error type for the Recall system.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("rerank error: {0}")]
    Rerank(#[from] RerankError),

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias used throughout the workspace.
pub type RecallResult<T> = Result<T, RecallError>;

/// Retrieval subsystem errors.
///
/// Backend failures are deliberately absent: the orchestrator isolates them
/// per-adapter and treats them as empty contributions, so they never surface
/// as error values.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}

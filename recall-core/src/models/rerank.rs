use serde::{Deserialize, Serialize};

/// One document's score after LLM reranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankedDocument {
    /// Position of the document in the input list.
    pub doc_index: usize,
    /// Model-assigned relevance, mapped to [0, 1].
    pub score: f64,
    /// The score the document carried before reranking.
    pub original_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Output of the rerank stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankOutput {
    pub documents: Vec<RerankedDocument>,
    /// True when any document fell back to a default score (timeout, parse
    /// failure, or model error).
    pub fallback: bool,
}

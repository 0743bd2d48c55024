use serde::{Deserialize, Serialize};

/// A single hit from one retrieval backend.
///
/// `raw_score` is on the backend's own scale (BM25, cosine similarity, tag
/// overlap count) and is only comparable within one backend's list — that is
/// what rank fusion exists to bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResult {
    pub id: String,
    pub content: String,
    pub raw_score: f64,
    /// Registered name of the backend that produced this hit.
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub matched_tags: Vec<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl BackendResult {
    pub fn new(id: impl Into<String>, content: impl Into<String>, raw_score: f64, backend: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            raw_score,
            backend: backend.into(),
            source_file: None,
            matched_tags: Vec::new(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_source_file(mut self, path: impl Into<String>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.matched_tags = tags;
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

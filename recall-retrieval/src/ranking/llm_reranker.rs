//! LLM reranking with batching, a wall-clock deadline, and graceful fallback.
//!
//! Documents go to the model in fixed-size batches, each call asking for a
//! JSON array of 0-10 scores. The whole stage runs under one deadline: when
//! it expires mid-flight, already-scored batches are kept and the rest fall
//! back to a monotonically decaying default, so callers always get a usable
//! ordering and never an error.

use std::time::Duration;

use moka::sync::Cache;
use serde::Deserialize;
use std::sync::Arc;
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

use recall_core::config::{CacheConfig, RerankRuntimeConfig};
use recall_core::models::{FusedResult, RerankOutput, RerankedDocument};
use recall_core::traits::ChatModel;

use recall_core::config::defaults::RERANK_FALLBACK_STEP;

/// One document handed to the reranker.
#[derive(Debug, Clone)]
pub struct DocumentToRank {
    pub text: String,
    pub original_score: f64,
}

/// Per-batch score as the model reports it (0-10 scale).
#[derive(Debug, Deserialize)]
struct BatchScore {
    #[serde(rename = "docIndex")]
    doc_index: usize,
    score: f64,
    #[serde(default)]
    explanation: Option<String>,
}

pub struct LlmReranker {
    model: Arc<dyn ChatModel>,
    /// Keyed by a fingerprint of (query, documents). Short TTL: rankings go
    /// stale as the underlying stores change.
    cache: Cache<String, RerankOutput>,
}

impl LlmReranker {
    pub fn new(model: Arc<dyn ChatModel>, cache_config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(cache_config.rerank_capacity)
            .time_to_live(Duration::from_secs(cache_config.rerank_ttl_secs))
            .build();
        Self { model, cache }
    }

    /// Rerank documents against the query. Never fails: degraded paths set
    /// `fallback = true` on the output instead.
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[DocumentToRank],
        config: &RerankRuntimeConfig,
    ) -> RerankOutput {
        let documents = &documents[..documents.len().min(config.max_documents)];
        if documents.is_empty() {
            return RerankOutput {
                documents: Vec::new(),
                fallback: false,
            };
        }

        let key = cache_key(query, documents);
        if let Some(cached) = self.cache.get(&key) {
            debug!("rerank cache hit");
            return cached;
        }

        let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);
        let mut scores: Vec<Option<(f64, Option<String>)>> = vec![None; documents.len()];
        let mut fallback = false;

        let batch_size = config.batch_size.max(1);
        for batch_start in (0..documents.len()).step_by(batch_size) {
            let batch_end = (batch_start + batch_size).min(documents.len());
            let now = Instant::now();
            if now >= deadline {
                warn!(remaining_docs = documents.len() - batch_start, "rerank deadline hit");
                fallback = true;
                break;
            }

            let prompt = batch_prompt(query, documents, batch_start, batch_end);
            let call = self.model.complete(config.model_id.as_deref(), &prompt);
            match timeout(deadline - now, call).await {
                Ok(Ok(response)) => match parse_batch(&response) {
                    Some(batch_scores) => {
                        for s in batch_scores {
                            if s.doc_index >= batch_start && s.doc_index < batch_end {
                                scores[s.doc_index] =
                                    Some(((s.score / 10.0).clamp(0.0, 1.0), s.explanation));
                            }
                        }
                    }
                    None => {
                        // This batch only; later batches still get their shot.
                        warn!(batch_start, "unparseable rerank batch, using defaults");
                        fallback = true;
                    }
                },
                Ok(Err(e)) => {
                    warn!(batch_start, error = %e, "rerank model call failed");
                    fallback = true;
                }
                Err(_) => {
                    warn!(batch_start, "rerank timed out mid-batch");
                    fallback = true;
                    break;
                }
            }
        }

        let reranked: Vec<RerankedDocument> = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let (score, explanation) = match scores[i].take() {
                    Some((s, e)) => (s, e),
                    None => {
                        fallback = true;
                        ((1.0 - RERANK_FALLBACK_STEP * i as f64).max(0.0), None)
                    }
                };
                RerankedDocument {
                    doc_index: i,
                    score,
                    original_score: doc.original_score,
                    explanation,
                }
            })
            .collect();

        let output = RerankOutput {
            documents: reranked,
            fallback,
        };
        // Degraded outputs are not worth pinning for the full TTL.
        if !fallback {
            self.cache.insert(key, output.clone());
        }
        output
    }

}

fn cache_key(query: &str, documents: &[DocumentToRank]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(query.as_bytes());
    for doc in documents {
        hasher.update(&[0x1f]);
        hasher.update(doc.text.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

fn batch_prompt(
    query: &str,
    documents: &[DocumentToRank],
    batch_start: usize,
    batch_end: usize,
) -> String {
    let mut prompt = format!(
        "Rate how relevant each document is to the query on a 0-10 scale.\n\
         Query: {query}\n\nDocuments:\n"
    );
    for (i, doc) in documents[batch_start..batch_end].iter().enumerate() {
        let idx = batch_start + i;
        // Long documents are trimmed to keep the prompt bounded.
        let excerpt: String = doc.text.chars().take(500).collect();
        prompt.push_str(&format!("[{idx}] {excerpt}\n"));
    }
    prompt.push_str(
        "\nRespond with only a JSON array: [{\"docIndex\": <n>, \"score\": <0-10>}, ...]",
    );
    prompt
}

/// Pull a JSON array out of the response, tolerating surrounding prose.
fn parse_batch(response: &str) -> Option<Vec<BatchScore>> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&response[start..=end]).ok()
}

/// Map reranked scores back onto results by positional index and re-sort.
///
/// Results the rerank output does not cover keep their score; the stable
/// sort preserves their relative order.
pub fn apply_rerank(results: &mut [FusedResult], output: &RerankOutput) {
    for doc in &output.documents {
        if let Some(result) = results.get_mut(doc.doc_index) {
            result.fused_score = doc.score;
        }
    }
    results.sort_by(|a, b| {
        b.fused_score
            .partial_cmp(&a.fused_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tolerates_surrounding_prose() {
        let response = r#"Here are the scores:
            [{"docIndex": 0, "score": 8}, {"docIndex": 1, "score": 3.5}]
            Hope that helps!"#;
        let scores = parse_batch(response).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].doc_index, 0);
        assert!((scores[1].score - 3.5).abs() < 1e-12);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_batch("no json here").is_none());
        assert!(parse_batch("] backwards [").is_none());
        assert!(parse_batch("[{\"wrong\": true}]").is_none());
    }

    #[test]
    fn cache_key_is_order_sensitive() {
        let a = DocumentToRank {
            text: "alpha".into(),
            original_score: 0.1,
        };
        let b = DocumentToRank {
            text: "beta".into(),
            original_score: 0.2,
        };
        let ab = cache_key("q", &[a.clone(), b.clone()]);
        let ba = cache_key("q", &[b, a]);
        assert_ne!(ab, ba);
    }
}

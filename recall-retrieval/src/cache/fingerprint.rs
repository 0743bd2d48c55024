//! Deterministic cache-key fingerprints.

use recall_core::models::SearchQuery;

/// Fingerprint of everything that changes a search's output: normalized
/// query text, sorted backend set, result shaping, mode flags, and time
/// window bounds. Same inputs, same key, regardless of option order.
pub fn search_fingerprint(query: &SearchQuery, use_rerank: bool, use_wave_rag: bool) -> String {
    let normalized: String = query
        .text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut backends = query.backends.clone();
    backends.sort();

    let mut hasher = blake3::Hasher::new();
    hasher.update(normalized.as_bytes());
    for backend in &backends {
        hasher.update(&[0x1f]);
        hasher.update(backend.as_bytes());
    }
    hasher.update(&(query.top_k as u64).to_le_bytes());
    hasher.update(&query.threshold.to_le_bytes());
    hasher.update(&[query.use_rrf as u8, use_rerank as u8, use_wave_rag as u8]);
    hasher.update(&query.rrf_k.to_le_bytes());
    if let Some(window) = &query.time_window {
        hasher.update(&window.start.timestamp_millis().to_le_bytes());
        hasher.update(&window.end.timestamp_millis().to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

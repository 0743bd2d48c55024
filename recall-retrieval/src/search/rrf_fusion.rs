//! Reciprocal Rank Fusion: score = Σ 1/(k + rank + 1)
//!
//! Combines per-backend ranked lists into a single fused ranking without
//! requiring score normalization across different retrieval methods. Hits
//! that several backends surface are merged under a content-prefix dedup key
//! so cross-backend agreement compounds instead of duplicating.

use std::collections::HashMap;

use recall_core::models::{BackendResult, FusedResult, LearningInfo};

/// Fusion tuning knobs, resolved from config + per-call options.
#[derive(Debug, Clone)]
pub struct FusionParams {
    /// RRF smoothing constant (default 60). Higher k reduces the influence
    /// of high-ranking items from any single list.
    pub k: u32,
    pub top_k: usize,
    /// Content-prefix length used as the cross-backend dedup key.
    pub dedup_prefix_chars: usize,
    /// Divide fused scores by the maximum so the top result scores 1.0.
    pub normalize: bool,
}

/// Dedup key: normalized content prefix. Merges near-duplicate hits that
/// multiple backends surface with different ids.
pub fn dedup_key(content: &str, prefix_chars: usize) -> String {
    content
        .trim()
        .to_lowercase()
        .chars()
        .take(prefix_chars)
        .collect()
}

struct Accumulator {
    best: BackendResult,
    score: f64,
    backends: Vec<String>,
    /// Insertion order, for deterministic tie-breaking.
    arrival: usize,
}

/// Fuse threshold-filtered backend results via Reciprocal Rank Fusion.
///
/// Results are grouped by backend; within each group the descending raw-score
/// order defines 0-based ranks (stable, so arrival order breaks raw-score
/// ties). Each item contributes `1/(k + rank + 1)` to its dedup key's total.
pub fn fuse(results: &[BackendResult], params: &FusionParams) -> Vec<FusedResult> {
    // Group by backend, preserving arrival order within each group.
    let mut by_backend: HashMap<&str, Vec<&BackendResult>> = HashMap::new();
    let mut backend_order: Vec<&str> = Vec::new();
    for r in results {
        let group = by_backend.entry(r.backend.as_str()).or_default();
        if group.is_empty() {
            backend_order.push(r.backend.as_str());
        }
        group.push(r);
    }

    let mut accumulators: HashMap<String, Accumulator> = HashMap::new();
    let mut arrivals = 0usize;

    // Iterate backends in first-seen order so arrival indices are stable.
    for backend in backend_order {
        let mut group = by_backend.remove(backend).unwrap_or_default();
        // Stable sort: raw-score ties keep original arrival order.
        group.sort_by(|a, b| {
            b.raw_score
                .partial_cmp(&a.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (rank, result) in group.into_iter().enumerate() {
            let rrf = 1.0 / (f64::from(params.k) + rank as f64 + 1.0);
            let key = dedup_key(&result.content, params.dedup_prefix_chars);

            let entry = accumulators.entry(key).or_insert_with(|| {
                arrivals += 1;
                Accumulator {
                    best: result.clone(),
                    score: 0.0,
                    backends: Vec::new(),
                    arrival: arrivals,
                }
            });
            entry.score += rrf;
            if !entry.backends.contains(&result.backend) {
                entry.backends.push(result.backend.clone());
            }
            if result.raw_score > entry.best.raw_score {
                entry.best = result.clone();
            }
        }
    }

    let mut fused: Vec<(Accumulator, f64)> = accumulators
        .into_values()
        .map(|acc| {
            let score = acc.score;
            (acc, score)
        })
        .collect();

    // Sort by fused score descending; equal scores fall back to arrival
    // order so identical inputs always produce identical output.
    fused.sort_by(|(a, sa), (b, sb)| {
        sb.partial_cmp(sa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.arrival.cmp(&b.arrival))
    });
    fused.truncate(params.top_k);

    let max_score = fused
        .first()
        .map(|(_, s)| *s)
        .unwrap_or(1.0)
        .max(f64::EPSILON);

    fused
        .into_iter()
        .map(|(acc, score)| {
            let fused_score = if params.normalize {
                score / max_score
            } else {
                score
            };
            FusedResult {
                result: acc.best,
                fused_score,
                contributing_backends: acc.backends,
                learning: LearningInfo::default(),
            }
        })
        .collect()
}

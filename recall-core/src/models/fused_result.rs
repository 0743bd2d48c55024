use serde::{Deserialize, Serialize};

use super::backend_result::BackendResult;

/// Audit trail for the learned-weight adjustment applied to a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningInfo {
    /// Mean learned weight over the result's tags known to the learner.
    pub applied_weight: f64,
    /// Pre-boost score, recoverable as `fused_score / applied_weight`.
    pub raw_score: f64,
    /// The subset of matched tags the learner had weights for.
    pub matched_learning_tags: Vec<String>,
    /// How often the user has selected results carrying these tags.
    pub user_selection_count: u32,
}

impl Default for LearningInfo {
    fn default() -> Self {
        Self {
            applied_weight: 1.0,
            raw_score: 0.0,
            matched_learning_tags: Vec::new(),
            user_selection_count: 0,
        }
    }
}

/// A result after fusion: the best backend hit for a dedup key, plus fusion
/// score and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedResult {
    /// The representative hit (highest raw score among duplicates).
    pub result: BackendResult,
    /// Fused score. RRF-accumulated when fusion ran, raw score otherwise.
    pub fused_score: f64,
    /// Every backend that surfaced this result, for provenance display and
    /// tag-weight correlation.
    pub contributing_backends: Vec<String>,
    #[serde(default)]
    pub learning: LearningInfo,
}

impl FusedResult {
    /// Wrap a single-backend hit without fusion.
    pub fn from_backend(result: BackendResult) -> Self {
        let backend = result.backend.clone();
        let score = result.raw_score;
        Self {
            result,
            fused_score: score,
            contributing_backends: vec![backend],
            learning: LearningInfo::default(),
        }
    }
}

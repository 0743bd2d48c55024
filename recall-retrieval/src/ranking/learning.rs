//! Learned-weight score adjustment.
//!
//! The learner supplies per-tag weights; this stage turns them into a query
//! boost and a per-result multiplier, keeping enough audit state on each
//! result to recover the pre-boost score.

use recall_core::config::defaults::{TAG_BOOST_MAX, TAG_BOOST_MIN, TAG_BOOST_SCALE};
use recall_core::models::FusedResult;
use recall_core::traits::RelevanceLearner;

/// Derive a tag boost from the query's extracted tags when the caller did
/// not supply one: `clamp(avg_learned_weight * 0.5, 0.1, 1.0)`.
///
/// Tags the learner has never seen are excluded from the average; with no
/// known tags at all the average is neutral (1.0).
pub fn derive_tag_boost(tags: &[String], learner: &dyn RelevanceLearner) -> f64 {
    let weights: Vec<f64> = tags.iter().filter_map(|t| learner.learned_weight(t)).collect();
    let avg = if weights.is_empty() {
        1.0
    } else {
        weights.iter().sum::<f64>() / weights.len() as f64
    };
    (avg * TAG_BOOST_SCALE).clamp(TAG_BOOST_MIN, TAG_BOOST_MAX)
}

/// Annotate and adjust fused results with learned tag weights.
///
/// For each result, `applied_weight` interpolates between neutral (1.0) and
/// the mean learned weight of its recognized tags, scaled by `tag_boost`.
/// The fused score is multiplied by it; `learning.raw_score` keeps the
/// pre-boost value so `fused_score / applied_weight` recovers it.
pub fn apply_learned_weights(
    results: &mut [FusedResult],
    learner: &dyn RelevanceLearner,
    tag_boost: f64,
) {
    for result in results.iter_mut() {
        let mut matched: Vec<String> = Vec::new();
        let mut weights: Vec<f64> = Vec::new();
        for tag in &result.result.matched_tags {
            if let Some(w) = learner.learned_weight(tag) {
                matched.push(tag.clone());
                weights.push(w);
            }
        }

        let mean_weight = if weights.is_empty() {
            1.0
        } else {
            weights.iter().sum::<f64>() / weights.len() as f64
        };
        let applied_weight = 1.0 + (mean_weight - 1.0) * tag_boost;

        let selection_count = matched
            .iter()
            .map(|t| learner.selection_count(t))
            .max()
            .unwrap_or(0);

        result.learning.raw_score = result.fused_score;
        result.learning.applied_weight = applied_weight;
        result.learning.matched_learning_tags = matched;
        result.learning.user_selection_count = selection_count;
        result.fused_score *= applied_weight;
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
    use std::collections::HashMap;

    use recall_core::models::BackendResult;

    struct MapLearner {
        weights: HashMap<String, f64>,
    }

    impl MapLearner {
        fn new(pairs: &[(&str, f64)]) -> Self {
            Self {
                weights: pairs.iter().map(|(t, w)| (t.to_string(), *w)).collect(),
            }
        }
    }

    impl RelevanceLearner for MapLearner {
        fn learned_weight(&self, tag: &str) -> Option<f64> {
            self.weights.get(tag).copied()
        }
        fn associated_tags(&self, _tag: &str, _k: usize) -> Vec<(String, f64)> {
            Vec::new()
        }
        fn record_query(&self, _tags: &[String], _source: &str) {}
        fn record_positive_feedback(&self, _query: &str, _result_id: &str, _tags: &[String]) {}
        fn record_negative_feedback(&self, _query: &str, _result_id: &str, _tags: &[String]) {}
    }

    fn fused(id: &str, score: f64, tags: &[&str]) -> FusedResult {
        let r = BackendResult::new(id, format!("content {id}"), score, "lexical")
            .with_tags(tags.iter().map(|t| t.to_string()).collect());
        FusedResult {
            fused_score: score,
            ..FusedResult::from_backend(r)
        }
    }

    #[test]
    fn boost_is_clamped_average() {
        let learner = MapLearner::new(&[("rust", 1.2), ("cargo", 0.8)]);
        let tags = vec!["rust".to_string(), "cargo".to_string()];
        // avg 1.0 * 0.5 = 0.5
        assert!((derive_tag_boost(&tags, &learner) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unknown_tags_yield_neutral_boost() {
        let learner = MapLearner::new(&[]);
        let tags = vec!["never-seen".to_string()];
        assert!((derive_tag_boost(&tags, &learner) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn extreme_weights_hit_the_clamp() {
        let learner = MapLearner::new(&[("hot", 3.0)]);
        assert!((derive_tag_boost(&["hot".to_string()], &learner) - 1.0).abs() < 1e-12);
        let learner = MapLearner::new(&[("cold", 0.01)]);
        assert!((derive_tag_boost(&["cold".to_string()], &learner) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn raw_score_is_recoverable() {
        let learner = MapLearner::new(&[("rust", 1.5)]);
        let mut results = vec![fused("a", 0.6, &["rust"])];
        apply_learned_weights(&mut results, &learner, 1.0);

        let r = &results[0];
        assert!((r.learning.applied_weight - 1.5).abs() < 1e-12);
        assert!((r.fused_score - 0.9).abs() < 1e-12);
        assert!((r.fused_score / r.learning.applied_weight - r.learning.raw_score).abs() < 1e-12);
        assert_eq!(r.learning.matched_learning_tags, vec!["rust"]);
    }

    #[test]
    fn weighted_results_resort() {
        let learner = MapLearner::new(&[("boosted", 2.0)]);
        let mut results = vec![fused("plain", 0.6, &[]), fused("hot", 0.5, &["boosted"])];
        apply_learned_weights(&mut results, &learner, 1.0);
        assert_eq!(results[0].result.id, "hot");
    }

    #[test]
    fn results_without_known_tags_are_untouched() {
        let learner = MapLearner::new(&[("other", 2.0)]);
        let mut results = vec![fused("a", 0.4, &["unknown"])];
        apply_learned_weights(&mut results, &learner, 1.0);
        assert!((results[0].fused_score - 0.4).abs() < 1e-12);
        assert!((results[0].learning.applied_weight - 1.0).abs() < 1e-12);
    }
}

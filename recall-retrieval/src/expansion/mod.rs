//! Query expansion: static semantic groups + learned co-occurrence.

pub mod semantic_groups;
pub mod tokenizer;

pub use semantic_groups::SemanticGroupIndex;
pub use tokenizer::extract_tags;

use tracing::debug;

use recall_core::config::{RetrievalConfig, SemanticGroup};
use recall_core::traits::RelevanceLearner;

/// Composes the two expansion sources: a static word → group index built once
/// from configuration, and the learner's dynamic tag co-occurrence graph.
pub struct QueryExpander {
    groups: SemanticGroupIndex,
    max_expanded_terms: usize,
    association_top_k: usize,
    expansion_factor: f64,
}

impl QueryExpander {
    pub fn new(groups: Vec<SemanticGroup>, config: &RetrievalConfig) -> Self {
        Self {
            groups: SemanticGroupIndex::build(groups),
            max_expanded_terms: config.max_expanded_terms,
            association_top_k: config.association_top_k,
            expansion_factor: config.expansion_factor.clamp(0.0, 1.0),
        }
    }

    /// Expand query tags into related terms.
    ///
    /// Group words come first, then co-occurrence associations ordered by
    /// factor-weighted strength. The original tags never appear in the
    /// output, and the merged set is capped at `max_expanded_terms`.
    pub fn expand(
        &self,
        tags: &[String],
        scope_names: &[String],
        learner: Option<&dyn RelevanceLearner>,
    ) -> Vec<String> {
        let mut expanded = self.groups.expand(tags, scope_names);

        if let Some(learner) = learner {
            let mut associations: Vec<(String, f64)> = Vec::new();
            for tag in tags {
                for (term, strength) in learner.associated_tags(tag, self.association_top_k) {
                    let weighted = strength * self.expansion_factor;
                    if weighted <= 0.0 {
                        continue;
                    }
                    match associations.iter_mut().find(|(t, _)| *t == term) {
                        Some((_, existing)) => *existing = existing.max(weighted),
                        None => associations.push((term, weighted)),
                    }
                }
            }
            associations.sort_by(|a, b| {
                b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
            });
            for (term, _) in associations {
                if !tags.contains(&term) && !expanded.contains(&term) {
                    expanded.push(term);
                }
            }
        }

        expanded.truncate(self.max_expanded_terms);
        debug!(tags = tags.len(), expanded = expanded.len(), "query expanded");
        expanded
    }
}

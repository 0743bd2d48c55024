//! Static semantic-group expansion.
//!
//! A word → group index is built once from configuration. A query token
//! matching any word in a group pulls in the rest of that group's words.

use std::collections::HashMap;

use recall_core::config::SemanticGroup;

/// Word → group index over the configured semantic groups.
pub struct SemanticGroupIndex {
    groups: Vec<SemanticGroup>,
    /// Lowercased word → indices into `groups`.
    word_to_groups: HashMap<String, Vec<usize>>,
}

impl SemanticGroupIndex {
    pub fn build(groups: Vec<SemanticGroup>) -> Self {
        let mut word_to_groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for word in &group.words {
                word_to_groups
                    .entry(word.to_lowercase())
                    .or_default()
                    .push(idx);
            }
        }
        Self {
            groups,
            word_to_groups,
        }
    }

    /// Group indices activated by the query tokens themselves.
    fn detect_groups(&self, tokens: &[String]) -> Vec<usize> {
        let mut active: Vec<usize> = Vec::new();
        for token in tokens {
            if let Some(indices) = self.word_to_groups.get(&token.to_lowercase()) {
                for &idx in indices {
                    if !active.contains(&idx) {
                        active.push(idx);
                    }
                }
            }
        }
        active
    }

    /// Group indices matching explicit scope names, by exact id or id-prefix
    /// (`emotion` scopes in `emotion_positive` and `emotion_negative`).
    fn scoped_groups(&self, names: &[String]) -> Vec<usize> {
        let mut active: Vec<usize> = Vec::new();
        for name in names {
            for (idx, group) in self.groups.iter().enumerate() {
                let matches = group.name == *name
                    || (group.name.starts_with(name.as_str())
                        && group.name[name.len()..].starts_with('_'));
                if matches && !active.contains(&idx) {
                    active.push(idx);
                }
            }
        }
        active
    }

    /// Expand query tokens with related group words.
    ///
    /// When `scope_names` is non-empty, only groups matching those names are
    /// consulted; otherwise groups are auto-detected from token matches.
    /// Words already present in the query are never emitted.
    pub fn expand(&self, tokens: &[String], scope_names: &[String]) -> Vec<String> {
        let active = if scope_names.is_empty() {
            self.detect_groups(tokens)
        } else {
            self.scoped_groups(scope_names)
        };

        let mut expanded: Vec<String> = Vec::new();
        for idx in active {
            for word in &self.groups[idx].words {
                let lower = word.to_lowercase();
                if tokens.iter().any(|t| t.eq_ignore_ascii_case(&lower) || *t == lower) {
                    continue;
                }
                if !expanded.contains(&lower) {
                    expanded.push(lower);
                }
            }
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, words: &[&str]) -> SemanticGroup {
        SemanticGroup {
            name: name.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn index() -> SemanticGroupIndex {
        SemanticGroupIndex::build(vec![
            group("learning", &["学习", "笔记", "知识"]),
            group("emotion_positive", &["happy", "joy"]),
            group("emotion_negative", &["sad", "angry"]),
        ])
    }

    #[test]
    fn token_match_pulls_in_rest_of_group() {
        let tokens = vec!["学习".to_string()];
        let expanded = index().expand(&tokens, &[]);
        assert_eq!(expanded, vec!["笔记", "知识"]);
    }

    #[test]
    fn original_tokens_are_excluded() {
        let tokens = vec!["学习".to_string(), "笔记".to_string()];
        let expanded = index().expand(&tokens, &[]);
        assert_eq!(expanded, vec!["知识"]);
    }

    #[test]
    fn no_match_expands_nothing() {
        let tokens = vec!["unrelated".to_string()];
        assert!(index().expand(&tokens, &[]).is_empty());
    }

    #[test]
    fn scoped_prefix_matches_hierarchical_groups() {
        let tokens = vec!["query".to_string()];
        let expanded = index().expand(&tokens, &["emotion".to_string()]);
        assert_eq!(expanded, vec!["happy", "joy", "sad", "angry"]);
    }

    #[test]
    fn scoped_exact_matches_single_group() {
        let tokens = vec!["query".to_string()];
        let expanded = index().expand(&tokens, &["emotion_negative".to_string()]);
        assert_eq!(expanded, vec!["sad", "angry"]);
    }

    #[test]
    fn prefix_requires_separator() {
        // "emo" must not match "emotion_positive".
        let tokens = vec!["query".to_string()];
        assert!(index().expand(&tokens, &["emo".to_string()]).is_empty());
    }
}

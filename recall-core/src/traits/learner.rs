/// External relevance-learning capability, consumed rather than reimplemented.
///
/// Implementations maintain per-tag learned weights and a tag co-occurrence
/// graph; how they learn is their business.
pub trait RelevanceLearner: Send + Sync {
    /// Learned weight for a tag, or `None` when the learner has never seen it.
    /// Unknown tags are excluded from averages rather than counted as zero.
    fn learned_weight(&self, tag: &str) -> Option<f64>;

    /// Top-k tags statistically associated with `tag`, with association
    /// strength in [0, 1].
    fn associated_tags(&self, tag: &str, k: usize) -> Vec<(String, f64)>;

    /// How many times the user selected results carrying this tag. Learners
    /// without selection tracking keep the default.
    fn selection_count(&self, _tag: &str) -> u32 {
        0
    }

    /// Record that a query with these tags ran, for co-occurrence updates.
    fn record_query(&self, tags: &[String], source: &str);

    /// The user selected `result_id` from a search for `query`.
    fn record_positive_feedback(&self, query: &str, result_id: &str, tags: &[String]);

    /// The user rejected or ignored `result_id`.
    fn record_negative_feedback(&self, query: &str, result_id: &str, tags: &[String]);
}

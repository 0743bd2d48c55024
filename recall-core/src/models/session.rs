use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fused_result::FusedResult;

/// Snapshot of one search, kept so later feedback can be resolved back to
/// the tags that produced a given result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSession {
    pub search_id: String,
    pub query: String,
    pub results: Vec<FusedResult>,
    pub timestamp: DateTime<Utc>,
}

impl SearchSession {
    /// Find the tags associated with a result in this session.
    pub fn tags_for_result(&self, result_id: &str) -> Option<Vec<String>> {
        self.results
            .iter()
            .find(|r| r.result.id == result_id)
            .map(|r| r.result.matched_tags.clone())
    }
}

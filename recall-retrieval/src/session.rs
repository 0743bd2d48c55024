//! SessionTracker — bounded search-id → snapshot map for feedback correlation.
//!
//! Written on every search regardless of cache usage, so a later feedback
//! call can always recover which tags produced a given result. Pruned to the
//! most recent entries by timestamp after each insert.

use std::sync::Arc;

use dashmap::DashMap;

use recall_core::models::{FusedResult, SearchSession};
use recall_core::traits::Clock;

pub struct SessionTracker {
    sessions: DashMap<String, SearchSession>,
    max_sessions: usize,
    clock: Arc<dyn Clock>,
}

impl SessionTracker {
    pub fn new(max_sessions: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions: max_sessions.max(1),
            clock,
        }
    }

    /// Record a search snapshot, then prune to the most recent entries.
    pub fn record(&self, search_id: &str, query: &str, results: &[FusedResult]) {
        self.sessions.insert(
            search_id.to_string(),
            SearchSession {
                search_id: search_id.to_string(),
                query: query.to_string(),
                results: results.to_vec(),
                timestamp: self.clock.now(),
            },
        );
        self.prune();
    }

    /// Snapshot lookup (cloned).
    pub fn get(&self, search_id: &str) -> Option<SearchSession> {
        self.sessions.get(search_id).map(|s| s.clone())
    }

    /// Tags associated with a result in a tracked session.
    pub fn tags_for(&self, search_id: &str, result_id: &str) -> Option<Vec<String>> {
        self.sessions
            .get(search_id)
            .and_then(|s| s.tags_for_result(result_id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn prune(&self) {
        let excess = self.sessions.len().saturating_sub(self.max_sessions);
        if excess == 0 {
            return;
        }
        let mut by_age: Vec<(String, chrono::DateTime<chrono::Utc>)> = self
            .sessions
            .iter()
            .map(|s| (s.key().clone(), s.timestamp))
            .collect();
        by_age.sort_by_key(|(_, ts)| *ts);
        for (key, _) in by_age.into_iter().take(excess) {
            self.sessions.remove(&key);
        }
    }
}

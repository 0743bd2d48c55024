//! TTL + LRU cache over full pipeline output.
//!
//! Explicit LRU structure (map + recency queue) rather than a general-purpose
//! cache: eviction order has to be exact and observable, not best-effort.
//! All eviction is lazy — on access (TTL) and on insert at capacity (oldest
//! first) — so no background task is ever required for correctness.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use recall_core::config::CacheConfig;
use recall_core::models::FusedResult;
use recall_core::traits::Clock;

struct CacheEntry {
    results: Vec<FusedResult>,
    timestamp: DateTime<Utc>,
    hit_count: u64,
}

pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    /// Front = least recently used, back = most recently used.
    recency: VecDeque<String>,
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    pub fn new(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            recency: VecDeque::new(),
            capacity: config.result_capacity.max(1),
            ttl: Duration::seconds(config.result_ttl_secs as i64),
            clock,
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
        }
        self.recency.push_back(key.to_string());
    }

    /// Look up cached results. Expired entries are removed and reported as a
    /// miss; a hit bumps the entry's hit count and recency.
    pub fn get(&mut self, key: &str) -> Option<Vec<FusedResult>> {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => now - entry.timestamp > self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            self.recency.retain(|k| k != key);
            debug!(key, "cache entry expired");
            return None;
        }

        self.touch(key);
        let entry = self.entries.get_mut(key)?;
        entry.hit_count += 1;
        Some(entry.results.clone())
    }

    /// Insert results, evicting the least recently used entry at capacity.
    pub fn set(&mut self, key: String, results: Vec<FusedResult>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                self.entries.remove(&oldest);
                debug!(key = %oldest, "evicted oldest cache entry");
            }
        }
        self.touch(&key);
        self.entries.insert(
            key,
            CacheEntry {
                results,
                timestamp: self.clock.now(),
                hit_count: 0,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hit_count(&self, key: &str) -> u64 {
        self.entries.get(key).map(|e| e.hit_count).unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Test clock that only moves when told to.
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Utc::now()),
            })
        }

        fn advance(&self, d: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += d;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn config(capacity: usize, ttl_secs: u64) -> CacheConfig {
        CacheConfig {
            result_capacity: capacity,
            result_ttl_secs: ttl_secs,
            ..Default::default()
        }
    }

    fn results(id: &str) -> Vec<FusedResult> {
        vec![FusedResult::from_backend(
            recall_core::models::BackendResult::new(id, format!("content {id}"), 1.0, "lexical"),
        )]
    }

    #[test]
    fn entry_lives_until_ttl_and_not_after() {
        let clock = ManualClock::new();
        let mut cache = ResultCache::new(&config(10, 60), clock.clone());
        cache.set("k".to_string(), results("a"));

        clock.advance(Duration::seconds(59));
        assert!(cache.get("k").is_some());

        clock.advance(Duration::seconds(2));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn capacity_plus_one_evicts_exactly_the_oldest() {
        let clock = ManualClock::new();
        let mut cache = ResultCache::new(&config(3, 60), clock);
        for key in ["a", "b", "c", "d"] {
            cache.set(key.to_string(), results(key));
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
    }

    #[test]
    fn access_moves_entry_to_most_recently_used() {
        let clock = ManualClock::new();
        let mut cache = ResultCache::new(&config(3, 60), clock);
        for key in ["a", "b", "c"] {
            cache.set(key.to_string(), results(key));
        }
        // Touch "a" so "b" is now the LRU entry.
        assert!(cache.get("a").is_some());
        cache.set("d".to_string(), results("d"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn hits_are_counted() {
        let clock = ManualClock::new();
        let mut cache = ResultCache::new(&config(3, 60), clock);
        cache.set("k".to_string(), results("a"));
        assert_eq!(cache.hit_count("k"), 0);
        cache.get("k");
        cache.get("k");
        assert_eq!(cache.hit_count("k"), 2);
    }

    #[test]
    fn overwriting_a_key_does_not_evict() {
        let clock = ManualClock::new();
        let mut cache = ResultCache::new(&config(2, 60), clock);
        cache.set("a".to_string(), results("a1"));
        cache.set("b".to_string(), results("b"));
        cache.set("a".to_string(), results("a2"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_some());
    }
}

//! RetrievalEngine: the full pipeline behind `intelligent_search`.
//!
//! query → extract/expand → cache check → strategy (fan-out + fusion) →
//! learned weights → temporal rerank → LLM rerank → session snapshot →
//! cache write → return.
//!
//! Every collaborator arrives through the constructor: backends, learner,
//! chat model, accelerator, clock. The engine owns no I/O of its own, and
//! the only error it ever returns before producing results is an invalid
//! query. Overall cancellation belongs to the caller (wrap the future in a
//! deadline); internal stage deadlines bound only their own stage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};
use uuid::Uuid;

use recall_core::config::RecallConfig;
use recall_core::errors::{RecallResult, RetrievalError};
use recall_core::models::{
    FusedResult, SearchOptions, SearchOutcome, SearchQuery, SearchReport,
};
use recall_core::traits::{ChatModel, Clock, MemoryBackend, RelevanceLearner, SystemClock, WaveAccelerator};

use crate::cache::{search_fingerprint, ResultCache};
use crate::expansion::{extract_tags, QueryExpander};
use crate::ranking::llm_reranker::{apply_rerank, DocumentToRank};
use crate::ranking::{learning, LlmReranker, TemporalReranker};
use crate::session::SessionTracker;
use crate::strategy::{AcceleratedStrategy, BaselineStrategy, RetrievalStrategy, StrategyOutcome};

/// Explicit name → backend registry, resolved once at application start.
#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn MemoryBackend>>,
    /// Registration order, used when configuration names no default set.
    order: Vec<String>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, backend: Arc<dyn MemoryBackend>) {
        let name = backend.name().to_string();
        if self.backends.insert(name.clone(), backend).is_none() {
            self.order.push(name);
        }
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Resolve names to adapters. Unknown names are skipped with a warning,
    /// never an error — a misconfigured backend list degrades, it does not
    /// abort.
    pub fn resolve(&self, names: &[String]) -> Vec<Arc<dyn MemoryBackend>> {
        let mut resolved = Vec::new();
        for name in names {
            match self.backends.get(name) {
                Some(backend) => resolved.push(Arc::clone(backend)),
                None => warn!(backend = %name, "unknown backend name, skipping"),
            }
        }
        resolved
    }
}

pub struct RetrievalEngine {
    registry: BackendRegistry,
    learner: Arc<dyn RelevanceLearner>,
    expander: QueryExpander,
    temporal: TemporalReranker,
    reranker: Option<LlmReranker>,
    baseline: BaselineStrategy,
    accelerated: Option<AcceleratedStrategy>,
    result_cache: Mutex<ResultCache>,
    sessions: SessionTracker,
    config: RecallConfig,
}

impl RetrievalEngine {
    pub fn new(
        registry: BackendRegistry,
        learner: Arc<dyn RelevanceLearner>,
        config: RecallConfig,
    ) -> Self {
        Self::with_clock(registry, learner, config, Arc::new(SystemClock))
    }

    /// Construct with an explicit clock (tests drive TTL and pruning with a
    /// manual one).
    pub fn with_clock(
        registry: BackendRegistry,
        learner: Arc<dyn RelevanceLearner>,
        config: RecallConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let expander = QueryExpander::new(config.semantic_groups.clone(), &config.retrieval);
        let temporal = TemporalReranker::new(config.temporal.clone());
        let baseline = BaselineStrategy::new(
            config.retrieval.dedup_prefix_chars,
            config.retrieval.normalize_scores,
        );
        let result_cache = Mutex::new(ResultCache::new(&config.cache, Arc::clone(&clock)));
        let sessions = SessionTracker::new(config.cache.max_sessions, Arc::clone(&clock));
        Self {
            registry,
            learner,
            expander,
            temporal,
            reranker: None,
            baseline,
            accelerated: None,
            result_cache,
            sessions,
            config,
        }
    }

    /// Enable the LLM rerank stage.
    pub fn with_chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.reranker = Some(LlmReranker::new(model, &self.config.cache));
        self
    }

    /// Enable the accelerated strategy. It still probes per call and falls
    /// through to the baseline invisibly.
    pub fn with_accelerator(mut self, accelerator: Arc<dyn WaveAccelerator>) -> Self {
        let baseline = BaselineStrategy::new(
            self.config.retrieval.dedup_prefix_chars,
            self.config.retrieval.normalize_scores,
        );
        self.accelerated = Some(AcceleratedStrategy::new(accelerator, baseline));
        self
    }

    /// Resolve raw text + options into a concrete query. The only fail-fast
    /// path in the pipeline: a blank query is rejected before any dispatch.
    fn resolve_query(&self, text: &str, options: &SearchOptions) -> RecallResult<SearchQuery> {
        if text.trim().is_empty() {
            return Err(RetrievalError::InvalidQuery {
                reason: "query text is empty".to_string(),
            }
            .into());
        }

        let retrieval = &self.config.retrieval;
        let tags = extract_tags(text, retrieval.max_query_tags);

        let expand = options.expand_query.unwrap_or(retrieval.expand_query);
        let expanded_terms = if expand {
            let learner = options.use_tag_memo.then_some(self.learner.as_ref());
            self.expander.expand(&tags, &options.group_names, learner)
        } else {
            Vec::new()
        };

        let backends = if options.backends.is_empty() {
            retrieval.default_backends.clone()
        } else {
            options.backends.clone()
        };

        let tag_boost = options
            .tag_boost
            .unwrap_or_else(|| learning::derive_tag_boost(&tags, self.learner.as_ref()));

        Ok(SearchQuery {
            text: text.to_string(),
            tags,
            expanded_terms,
            time_window: options.time_range,
            backends,
            top_k: options.top_k.unwrap_or(retrieval.top_k),
            threshold: options.threshold.unwrap_or(retrieval.threshold),
            use_rrf: options.use_rrf.unwrap_or(retrieval.use_rrf),
            rrf_k: options.rrf_k.unwrap_or(retrieval.rrf_k),
            tag_boost,
        })
    }

    /// Full pipeline. See the module docs for stage order.
    pub async fn intelligent_search(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> RecallResult<Vec<FusedResult>> {
        self.search_with_report(text, options)
            .await
            .map(|(results, _)| results)
    }

    /// As `intelligent_search`, but with per-call provenance.
    pub async fn search_with_report(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> RecallResult<(Vec<FusedResult>, SearchReport)> {
        // Step 1: Resolve and validate.
        let query = self.resolve_query(text, options)?;
        let search_id = Uuid::new_v4().to_string();
        debug!(
            tags = query.tags.len(),
            expanded = query.expanded_terms.len(),
            backends = query.backends.len(),
            "query resolved"
        );

        // Step 2: Cache check. Learning-mode calls bypass the cache so stale
        // ranks never get attributed to live feedback.
        let fingerprint = search_fingerprint(&query, options.use_rerank, options.use_wave_rag);
        if !options.learning_query {
            let cached = self
                .result_cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&fingerprint);
            if let Some(results) = cached {
                debug!(key = %fingerprint, "result cache hit");
                self.sessions.record(&search_id, text, &results);
                let outcome = if query.time_window.is_some() {
                    SearchOutcome::Recent
                } else {
                    SearchOutcome::Full
                };
                let report = SearchReport {
                    outcome,
                    rerank_fallback: false,
                    responding_backends: Vec::new(),
                    failed_backends: Vec::new(),
                    cache_hit: true,
                    search_id,
                };
                return Ok((results, report));
            }
        }

        // Step 3: Retrieve via the selected strategy.
        let backends = self.registry.resolve(&query.backends);
        let outcome = if backends.is_empty() {
            // Configuration problem, not a caller error: empty result set.
            warn!("no usable backends selected, returning empty results");
            StrategyOutcome::default()
        } else {
            match (&self.accelerated, options.use_wave_rag) {
                (Some(accelerated), true) => accelerated.retrieve(&query, &backends).await,
                _ => self.baseline.retrieve(&query, &backends).await,
            }
        };

        let StrategyOutcome {
            mut results,
            responding_backends,
            failed_backends,
            degraded,
        } = outcome;
        let candidates = results.len();
        results.truncate(query.top_k);

        // Step 4: Learned tag weights (annotated on every result).
        learning::apply_learned_weights(&mut results, self.learner.as_ref(), query.tag_boost);

        // Step 5: Temporal rerank, only with a resolved window.
        if let Some(window) = &query.time_window {
            self.temporal.rerank(&mut results, window);
        }

        // Step 6: Optional LLM rerank, deadline-bounded, never fatal.
        let mut rerank_fallback = false;
        if options.use_rerank {
            if let Some(reranker) = &self.reranker {
                let rerank_config = options
                    .rerank_config
                    .clone()
                    .unwrap_or_else(|| self.config.rerank.clone());
                let documents: Vec<DocumentToRank> = results
                    .iter()
                    .map(|r| DocumentToRank {
                        text: r.result.content.clone(),
                        original_score: r.fused_score,
                    })
                    .collect();
                let output = reranker.rerank(text, &documents, &rerank_config).await;
                rerank_fallback = output.fallback;
                apply_rerank(&mut results, &output);
            }
        }

        // Step 7: Session snapshot — always, so feedback stays resolvable.
        self.sessions.record(&search_id, text, &results);

        // Step 8: Cache write or learner notification.
        if options.learning_query {
            self.learner.record_query(&query.tags, "search");
        } else {
            self.result_cache
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set(fingerprint, results.clone());
        }

        let outcome = derive_outcome(
            degraded,
            &results,
            &responding_backends,
            candidates,
            query.top_k,
            query.time_window.is_some(),
        );
        info!(
            results = results.len(),
            ?outcome,
            failed = failed_backends.len(),
            "search complete"
        );

        let report = SearchReport {
            outcome,
            rerank_fallback,
            responding_backends,
            failed_backends,
            cache_hit: false,
            search_id,
        };
        Ok((results, report))
    }

    /// Single-backend preset: first configured backend, no expansion, no
    /// rerank.
    pub async fn quick_search(&self, text: &str) -> RecallResult<Vec<FusedResult>> {
        let first = self
            .config
            .retrieval
            .default_backends
            .first()
            .or_else(|| self.registry.names().first())
            .cloned();
        let options = SearchOptions {
            backends: first.into_iter().collect(),
            expand_query: Some(false),
            ..Default::default()
        };
        self.intelligent_search(text, &options).await
    }

    /// Everything-on preset: all configured backends, expansion, rerank.
    pub async fn deep_search(&self, text: &str) -> RecallResult<Vec<FusedResult>> {
        let backends = if self.config.retrieval.default_backends.is_empty() {
            self.registry.names().to_vec()
        } else {
            self.config.retrieval.default_backends.clone()
        };
        let options = SearchOptions {
            backends,
            expand_query: Some(true),
            use_tag_memo: true,
            use_rerank: true,
            ..Default::default()
        };
        self.intelligent_search(text, &options).await
    }

    /// Resolve feedback through the session snapshot and forward it to the
    /// learner. Returns false when the search id or result id is unknown.
    pub fn record_positive_feedback(&self, search_id: &str, result_id: &str) -> bool {
        self.forward_feedback(search_id, result_id, true)
    }

    pub fn record_negative_feedback(&self, search_id: &str, result_id: &str) -> bool {
        self.forward_feedback(search_id, result_id, false)
    }

    fn forward_feedback(&self, search_id: &str, result_id: &str, positive: bool) -> bool {
        let Some(session) = self.sessions.get(search_id) else {
            return false;
        };
        let Some(tags) = session.tags_for_result(result_id) else {
            return false;
        };
        if positive {
            self.learner
                .record_positive_feedback(&session.query, result_id, &tags);
        } else {
            self.learner
                .record_negative_feedback(&session.query, result_id, &tags);
        }
        true
    }

    pub fn session_count(&self) -> usize {
        self.sessions.session_count()
    }

    pub fn cached_searches(&self) -> usize {
        self.result_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Collapse what happened into the closed outcome set. Precedence: a degraded
/// strategy outranks result-set shape, which outranks recency bias.
fn derive_outcome(
    degraded: bool,
    results: &[FusedResult],
    responding: &[String],
    candidates: usize,
    top_k: usize,
    has_window: bool,
) -> SearchOutcome {
    if degraded {
        SearchOutcome::RagFallback
    } else if results.is_empty() && responding.is_empty() {
        SearchOutcome::Skipped
    } else if candidates > top_k {
        SearchOutcome::Truncated
    } else if has_window {
        SearchOutcome::Recent
    } else {
        SearchOutcome::Full
    }
}

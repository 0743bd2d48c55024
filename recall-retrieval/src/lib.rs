//! # recall-retrieval
//!
//! The query engine. Fan-out → fusion → adjustment → rerank → cache.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalEngine
//! ├── BackendRegistry (name → Arc<dyn MemoryBackend>)
//! ├── FanoutSearcher
//! │   ├── wait-all concurrent dispatch
//! │   ├── per-backend fault isolation
//! │   └── threshold filtering
//! ├── RRF Fusion (reciprocal rank, content-prefix dedup)
//! ├── QueryExpander
//! │   ├── Tokenizer (script-aware segments)
//! │   ├── SemanticGroups (static word groups)
//! │   └── co-occurrence associations (via RelevanceLearner)
//! ├── Ranking
//! │   ├── learning weights (tag boost + audit trail)
//! │   ├── TemporalReranker (window boost / exponential decay)
//! │   └── LlmReranker (batched, deadline-bounded, cached)
//! ├── Strategy (Baseline | Accelerated with invisible fallback)
//! ├── ResultCache (explicit LRU + TTL, fingerprint-keyed)
//! └── SessionTracker (bounded feedback correlation)
//! ```

pub mod cache;
pub mod engine;
pub mod expansion;
pub mod ranking;
pub mod search;
pub mod session;
pub mod strategy;

pub use engine::{BackendRegistry, RetrievalEngine};
pub use expansion::QueryExpander;
pub use search::FanoutSearcher;
pub use session::SessionTracker;

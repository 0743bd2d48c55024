// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_THRESHOLD: f64 = 0.0;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_USE_RRF: bool = true;
pub const DEFAULT_NORMALIZE_SCORES: bool = true;
pub const DEFAULT_DEDUP_PREFIX_CHARS: usize = 100;

// --- Query expansion ---
pub const DEFAULT_MAX_QUERY_TAGS: usize = 10;
pub const DEFAULT_MAX_EXPANDED_TERMS: usize = 10;
pub const DEFAULT_ASSOCIATION_TOP_K: usize = 5;
pub const DEFAULT_EXPANSION_FACTOR: f64 = 0.6;
pub const MIN_IDEOGRAPHIC_SEGMENT: usize = 2;
pub const MIN_ALPHABETIC_SEGMENT: usize = 3;

// --- Tag boost ---
pub const TAG_BOOST_SCALE: f64 = 0.5;
pub const TAG_BOOST_MIN: f64 = 0.1;
pub const TAG_BOOST_MAX: f64 = 1.0;

// --- Temporal reranking ---
pub const DEFAULT_IN_RANGE_BOOST: f64 = 1.5;
pub const DEFAULT_EDGE_FALLOFF: f64 = 0.3;
pub const DEFAULT_DECAY_LAMBDA: f64 = 0.1;
pub const DEFAULT_RECENCY_BOOST: bool = true;

// --- LLM reranking ---
pub const DEFAULT_RERANK_MAX_DOCUMENTS: usize = 20;
pub const DEFAULT_RERANK_BATCH_SIZE: usize = 5;
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 10_000;
pub const RERANK_FALLBACK_STEP: f64 = 0.05;

// --- Accelerated retrieval ---
pub const DEFAULT_WAVE_EXPANSION_DEPTH: usize = 2;
pub const DEFAULT_WAVE_TIMEOUT_MS: u64 = 5_000;

// --- Caching ---
pub const DEFAULT_RESULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_RESULT_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_RERANK_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_RERANK_CACHE_CAPACITY: u64 = 100;

// --- Sessions ---
pub const DEFAULT_MAX_SESSIONS: usize = 100;

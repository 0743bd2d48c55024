//! Result caching: fingerprint keys + an explicit LRU/TTL store.

pub mod fingerprint;
pub mod result_cache;

pub use fingerprint::search_fingerprint;
pub use result_cache::ResultCache;

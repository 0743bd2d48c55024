//! Data model for the retrieval pipeline.

mod backend_result;
mod fused_result;
mod outcome;
mod rerank;
mod search_query;
mod session;

pub use backend_result::BackendResult;
pub use fused_result::{FusedResult, LearningInfo};
pub use outcome::{SearchOutcome, SearchReport};
pub use rerank::{RerankOutput, RerankedDocument};
pub use search_query::{SearchOptions, SearchQuery, TimeWindow};
pub use session::SearchSession;

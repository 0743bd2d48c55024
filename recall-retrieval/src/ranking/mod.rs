//! Score adjustment stages: learned weights → temporal window → LLM rerank.

pub mod learning;
pub mod llm_reranker;
pub mod temporal;

pub use llm_reranker::LlmReranker;
pub use temporal::TemporalReranker;

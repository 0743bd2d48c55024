//! Injected capability seams.
//!
//! The engine owns no I/O of its own: backends, the learner, the chat model,
//! the accelerator, and even the clock arrive as trait objects resolved once
//! at application start.

mod accelerator;
mod backend;
mod chat_model;
mod clock;
mod learner;

pub use accelerator::WaveAccelerator;
pub use backend::MemoryBackend;
pub use chat_model::ChatModel;
pub use clock::{Clock, SystemClock};
pub use learner::RelevanceLearner;

//! State storage modules.
//!
//! Stores manage mutable state shared across use cases:
//! - `CustomQuestionStore` - Player-authored questions, persisted
//! - `PlayerRequestRegistry` - Topic requests, in memory only

pub mod custom_questions;
pub mod requests;

// Re-export store types
pub use custom_questions::CustomQuestionStore;
pub use requests::PlayerRequestRegistry;

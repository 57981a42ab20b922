//! # Connection Cards Vocabulary Types
//!
//! Closed enumerations shared by every other module: game modes, session
//! moods, request topics, relationship kinds and the question type.
//!
//! ## Design Principles
//!
//! 1. **Pure data types** - No I/O, no async, no side effects
//! 2. **Stable wire names** - Serde names match the display names that are
//!    already persisted in players' storage, so renaming a variant must keep
//!    its `#[serde(rename)]`
//! 3. **Serializable** - All types derive Serialize/Deserialize

mod mode;
pub use mode::{GameMode, QuestionType};

mod mood;
pub use mood::SessionMood;

mod relationship;
pub use relationship::RelationshipType;

mod topic;
pub use topic::RequestTopic;

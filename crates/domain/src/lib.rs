pub mod types;

pub mod common;

pub mod catalog;
pub mod classifier;
pub mod energy;
pub mod entities;
pub mod error;
pub mod ids;
pub mod round;
pub mod selection;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    CustomQuestion, CustomQuestionUpdate, ModeStats, Player, PlayerRequest, Question,
    QuestionSession, SessionStats, MAX_INTIMACY_LEVEL, MAX_SPECIFIC_PROMPT_CHARS,
    MIN_INTIMACY_LEVEL, REQUESTED_QUESTION_LIMIT, SESSION_DURATION_MS,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{CustomQuestionId, PlayerId, RequestId, SessionId};

pub use types::{GameMode, QuestionType, RelationshipType, RequestTopic, SessionMood};

pub use value_objects::{
    clamp_level, EnergyFactor, EnergyFactorKind, EnergyTrend, InteractionKind,
    InteractionMetrics, SessionConfig, SessionEnergy, DEFAULT_ENERGY_LEVEL, DEFAULT_INTENSITY,
    DEFAULT_RESPONSE_TIME_MS, MAX_ENERGY_LEVEL, MIN_ENERGY_LEVEL,
};

pub use catalog::{
    is_icebreaker, QuestionCatalog, FIRST_DATE_ICEBREAKERS, INITIAL_WILDCARDS, WILDCARD_TEXT,
};
pub use classifier::{Classification, KeywordClassifier, QuestionClassifier, ENERGY_TOLERANCE};
pub use energy::{EnergyEstimator, EnergyWeights, MAX_MANUAL_OFFSET};
pub use round::GameRound;
pub use selection::{
    build_deck, filter_by_energy, filter_by_mood, mode_pool, order_icebreakers_first, shuffle,
    Deck, SelectionCriteria, ICEBREAKER_SLOTS, MIN_POOL_FOR_FILTERING,
};

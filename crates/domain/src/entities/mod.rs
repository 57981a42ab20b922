//! Domain entities
//!
//! Entities are the records that live beyond a single call: questions (both
//! built-in and player-authored), players, topic requests and the
//! de-duplication session.

mod custom_question;
mod player;
mod player_request;
mod question;
mod session;

pub use custom_question::{CustomQuestion, CustomQuestionUpdate};
pub use player::Player;
pub use player_request::{PlayerRequest, MAX_SPECIFIC_PROMPT_CHARS, REQUESTED_QUESTION_LIMIT};
pub use question::{Question, MAX_INTIMACY_LEVEL, MIN_INTIMACY_LEVEL};
pub use session::{ModeStats, QuestionSession, SessionStats, SESSION_DURATION_MS};

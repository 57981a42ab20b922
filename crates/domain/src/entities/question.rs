//! Question value object

use serde::{Deserialize, Serialize};

use crate::types::{GameMode, QuestionType, RelationshipType, SessionMood};

pub const MIN_INTIMACY_LEVEL: u8 = 1;
pub const MAX_INTIMACY_LEVEL: u8 = 10;

/// A prompt card.
///
/// The text doubles as the identity key: two questions with the same text
/// are the same question for de-duplication, whichever source they came
/// from. Questions are immutable once built; the `with_*` methods consume
/// and return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    text: String,
    mode: GameMode,
    #[serde(rename = "type", default)]
    question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    mood_tags: Vec<SessionMood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intimacy_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    appropriate_relationships: Vec<RelationshipType>,
}

impl Question {
    /// Create a regular prompt for a mode
    pub fn new(text: impl Into<String>, mode: GameMode) -> Self {
        Self {
            text: text.into(),
            mode,
            question_type: QuestionType::Question,
            mood_tags: Vec::new(),
            intimacy_level: None,
            appropriate_relationships: Vec::new(),
        }
    }

    /// Create the wildcard sentinel. Its mode is never used for matching.
    pub fn wildcard(text: impl Into<String>) -> Self {
        Self {
            question_type: QuestionType::Wildcard,
            ..Self::new(text, GameMode::FirstDate)
        }
    }

    /// Tag with moods. Duplicates and the `All` bypass are dropped.
    pub fn with_mood_tags(mut self, tags: impl IntoIterator<Item = SessionMood>) -> Self {
        let mut mood_tags = Vec::new();
        for tag in tags {
            if tag.is_filter() && !mood_tags.contains(&tag) {
                mood_tags.push(tag);
            }
        }
        self.mood_tags = mood_tags;
        self
    }

    /// Set intimacy, clamped into 1..=10
    pub fn with_intimacy_level(mut self, level: u8) -> Self {
        self.intimacy_level = Some(level.clamp(MIN_INTIMACY_LEVEL, MAX_INTIMACY_LEVEL));
        self
    }

    pub fn with_relationships(
        mut self,
        relationships: impl IntoIterator<Item = RelationshipType>,
    ) -> Self {
        self.appropriate_relationships = relationships.into_iter().collect();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn is_wildcard(&self) -> bool {
        self.question_type == QuestionType::Wildcard
    }

    pub fn mood_tags(&self) -> &[SessionMood] {
        &self.mood_tags
    }

    pub fn intimacy_level(&self) -> Option<u8> {
        self.intimacy_level
    }

    pub fn appropriate_relationships(&self) -> &[RelationshipType] {
        &self.appropriate_relationships
    }

    /// Regular prompt belonging to `mode` (the wildcard never matches)
    pub fn belongs_to(&self, mode: GameMode) -> bool {
        !self.is_wildcard() && self.mode == mode
    }
}

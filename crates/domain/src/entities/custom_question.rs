//! Player-authored questions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Question;
use crate::ids::{CustomQuestionId, PlayerId};
use crate::types::{GameMode, SessionMood};

/// A question submitted by a player.
///
/// Only approved questions take part in selection. Submissions for group
/// play are approved on creation; other modes wait for an explicit approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomQuestion {
    pub id: CustomQuestionId,
    #[serde(flatten)]
    pub question: Question,
    pub author_id: PlayerId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub approved: bool,
}

impl CustomQuestion {
    pub fn new(
        id: CustomQuestionId,
        question: Question,
        author_id: PlayerId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let approved = question.mode().is_group();
        Self {
            id,
            question,
            author_id,
            created_at,
            approved,
        }
    }

    pub fn text(&self) -> &str {
        self.question.text()
    }

    pub fn mode(&self) -> GameMode {
        self.question.mode()
    }

    /// Apply a partial update. Identity, author and creation time never change.
    pub fn apply(&mut self, update: CustomQuestionUpdate) {
        let mut question = self.question.clone();
        if let Some(text) = update.text {
            question = question.with_text(text);
        }
        if let Some(mode) = update.mode {
            question = question.with_mode(mode);
        }
        if let Some(tags) = update.mood_tags {
            question = question.with_mood_tags(tags);
        }
        if let Some(level) = update.intimacy_level {
            question = question.with_intimacy_level(level);
        }
        self.question = question;
        if let Some(approved) = update.approved {
            self.approved = approved;
        }
    }
}

/// Partial update for a custom question; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomQuestionUpdate {
    pub text: Option<String>,
    pub mode: Option<GameMode>,
    pub mood_tags: Option<Vec<SessionMood>>,
    pub intimacy_level: Option<u8>,
    pub approved: Option<bool>,
}

impl CustomQuestionUpdate {
    pub fn approve() -> Self {
        Self {
            approved: Some(true),
            ..Self::default()
        }
    }
}

//! Topic requests - "ask me about..."

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{contains_any_ignore_case, StringExt};
use crate::entities::Question;
use crate::ids::{PlayerId, RequestId};
use crate::selection::shuffle;
use crate::types::{GameMode, RequestTopic, SessionMood};

/// Longest free-text prompt the request form accepts
pub const MAX_SPECIFIC_PROMPT_CHARS: usize = 150;

/// How many questions a fulfilled request deals
pub const REQUESTED_QUESTION_LIMIT: usize = 5;

/// Intimacy given to a question synthesized from a player's own prompt
const AD_HOC_INTIMACY: u8 = 7;

/// A player's wish to be asked about a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    pub id: RequestId,
    pub player_id: PlayerId,
    pub topic: RequestTopic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_prompt: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub fulfilled: bool,
}

impl PlayerRequest {
    /// Create an unfulfilled request.
    ///
    /// A blank prompt is stored as `None`; longer prompts are cut to
    /// [`MAX_SPECIFIC_PROMPT_CHARS`] characters.
    pub fn new(
        id: RequestId,
        player_id: PlayerId,
        topic: RequestTopic,
        specific_prompt: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            player_id,
            topic,
            specific_prompt: specific_prompt
                .into_trimmed_option()
                .map(|prompt| prompt.chars().take(MAX_SPECIFIC_PROMPT_CHARS).collect()),
            created_at,
            fulfilled: false,
        }
    }

    pub fn fulfill(&mut self) {
        self.fulfilled = true;
    }

    pub fn is_active(&self) -> bool {
        !self.fulfilled
    }

    /// Whether the question text touches this request's topic
    pub fn matches(&self, question: &Question) -> bool {
        contains_any_ignore_case(question.text(), self.topic.keywords())
    }

    /// The player's own prompt as a playable card
    pub fn ad_hoc_question(&self) -> Option<Question> {
        self.specific_prompt.as_ref().map(|prompt| {
            Question::new(prompt.clone(), GameMode::GroupMode)
                .with_mood_tags([SessionMood::Deep])
                .with_intimacy_level(AD_HOC_INTIMACY)
        })
    }

    /// Deal questions for this request from `pool`.
    ///
    /// Topic matches are shuffled and capped so the result never exceeds
    /// five cards. When the player wrote their own prompt it leads the
    /// result, followed by up to four matches.
    pub fn requested_questions(
        &self,
        pool: &[Question],
        pick: &mut impl FnMut(usize) -> usize,
    ) -> Vec<Question> {
        let mut matching: Vec<Question> = pool
            .iter()
            .filter(|question| !question.is_wildcard() && self.matches(question))
            .cloned()
            .collect();
        shuffle(&mut matching, pick);

        match self.ad_hoc_question() {
            Some(own) => {
                let mut result = Vec::with_capacity(REQUESTED_QUESTION_LIMIT);
                result.push(own);
                result.extend(matching.into_iter().take(REQUESTED_QUESTION_LIMIT - 1));
                result
            }
            None => {
                matching.truncate(REQUESTED_QUESTION_LIMIT);
                matching
            }
        }
    }
}

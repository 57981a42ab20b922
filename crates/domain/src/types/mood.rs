//! Session mood - the tone filter chosen at game start

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone filter narrowing question selection within a mode.
///
/// `All` is a bypass value: selecting it disables mood filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionMood {
    /// Relaxed and easy-going vibes
    Chill,
    /// Meaningful and thoughtful conversations
    Deep,
    /// Bold and adventurous questions
    Wild,
    /// Light-hearted and humorous
    Funny,
    /// All questions mixed together
    #[default]
    #[serde(rename = "All Questions")]
    All,
}

impl SessionMood {
    /// Moods that can tag a question (excludes the `All` bypass)
    pub fn taggable() -> &'static [SessionMood] {
        &[
            SessionMood::Chill,
            SessionMood::Deep,
            SessionMood::Wild,
            SessionMood::Funny,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SessionMood::Chill => "Chill",
            SessionMood::Deep => "Deep",
            SessionMood::Wild => "Wild",
            SessionMood::Funny => "Funny",
            SessionMood::All => "All Questions",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SessionMood::Chill => "Relaxed and easy-going vibes",
            SessionMood::Deep => "Meaningful and thoughtful conversations",
            SessionMood::Wild => "Bold and adventurous questions",
            SessionMood::Funny => "Light-hearted and humorous",
            SessionMood::All => "All questions mixed together",
        }
    }

    /// True when this mood narrows the pool at all
    pub fn is_filter(&self) -> bool {
        !matches!(self, SessionMood::All)
    }
}

impl fmt::Display for SessionMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SessionMood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chill" => Ok(SessionMood::Chill),
            "deep" => Ok(SessionMood::Deep),
            "wild" => Ok(SessionMood::Wild),
            "funny" => Ok(SessionMood::Funny),
            "all" | "all questions" => Ok(SessionMood::All),
            _ => Err(DomainError::parse(format!(
                "Unknown mood: '{}'. Valid values: chill, deep, wild, funny, all",
                s
            ))),
        }
    }
}

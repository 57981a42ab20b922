//! Game modes and question kinds

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A themed question category.
///
/// Modes are ordered from lightest to most intimate for couples, with
/// `GroupMode` as the party variant for more than two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "First Date")]
    FirstDate,
    #[serde(rename = "Second Date")]
    SecondDate,
    #[serde(rename = "Third Date")]
    ThirdDate,
    #[serde(rename = "Love Birds")]
    LoveBirds,
    #[serde(rename = "Friends Mode")]
    GroupMode,
}

impl GameMode {
    /// All modes in menu order
    pub fn all() -> &'static [GameMode] {
        &[
            GameMode::FirstDate,
            GameMode::SecondDate,
            GameMode::ThirdDate,
            GameMode::LoveBirds,
            GameMode::GroupMode,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::FirstDate => "First Date",
            GameMode::SecondDate => "Second Date",
            GameMode::ThirdDate => "Third Date",
            GameMode::LoveBirds => "Love Birds",
            GameMode::GroupMode => "Friends Mode",
        }
    }

    /// One-line pitch shown on the mode selection screen
    pub fn description(&self) -> &'static str {
        match self {
            GameMode::FirstDate => "Light & fun icebreakers",
            GameMode::SecondDate => "Slightly deeper prompts",
            GameMode::ThirdDate => "Emotional and intimate",
            GameMode::LoveBirds => "For established couples",
            GameMode::GroupMode => "Spicy, humorous & open-ended",
        }
    }

    /// The entry-level mode whose fresh decks open with icebreakers
    pub fn is_icebreaker_mode(&self) -> bool {
        matches!(self, GameMode::FirstDate)
    }

    /// Group play lets any number of players sit at the table and
    /// auto-approves player-submitted questions.
    pub fn is_group(&self) -> bool {
        matches!(self, GameMode::GroupMode)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for GameMode {
    type Err = DomainError;

    /// Accepts the display name or a compact spelling (`first-date`, `group`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "firstdate" | "1" => Ok(GameMode::FirstDate),
            "seconddate" | "2" => Ok(GameMode::SecondDate),
            "thirddate" | "3" => Ok(GameMode::ThirdDate),
            "lovebirds" | "4" => Ok(GameMode::LoveBirds),
            "friendsmode" | "groupmode" | "group" | "friends" | "5" => Ok(GameMode::GroupMode),
            _ => Err(DomainError::parse(format!(
                "Unknown game mode: '{}'. Valid values: First Date, Second Date, \
                Third Date, Love Birds, Friends Mode",
                s
            ))),
        }
    }
}

/// Whether a card is a regular prompt or the wildcard sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Question,
    Wildcard,
}

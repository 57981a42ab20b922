//! Topics a player can ask to be questioned about

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight predefined request topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestTopic {
    #[serde(rename = "Love & Relationships")]
    Love,
    #[serde(rename = "Career & Ambitions")]
    Career,
    #[serde(rename = "Family & Childhood")]
    Family,
    #[serde(rename = "Dreams & Aspirations")]
    Dreams,
    #[serde(rename = "Fears & Insecurities")]
    Fears,
    #[serde(rename = "Fun & Entertainment")]
    Fun,
    #[serde(rename = "Deep Thoughts")]
    Deep,
    #[serde(rename = "Secrets & Confessions")]
    Secrets,
}

impl RequestTopic {
    pub fn all() -> &'static [RequestTopic] {
        &[
            RequestTopic::Love,
            RequestTopic::Career,
            RequestTopic::Family,
            RequestTopic::Dreams,
            RequestTopic::Fears,
            RequestTopic::Fun,
            RequestTopic::Deep,
            RequestTopic::Secrets,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RequestTopic::Love => "Love & Relationships",
            RequestTopic::Career => "Career & Ambitions",
            RequestTopic::Family => "Family & Childhood",
            RequestTopic::Dreams => "Dreams & Aspirations",
            RequestTopic::Fears => "Fears & Insecurities",
            RequestTopic::Fun => "Fun & Entertainment",
            RequestTopic::Deep => "Deep Thoughts",
            RequestTopic::Secrets => "Secrets & Confessions",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RequestTopic::Love => "Questions about relationships, dating, and romance",
            RequestTopic::Career => "Work, ambitions, and professional goals",
            RequestTopic::Family => "Family dynamics, childhood, and home life",
            RequestTopic::Dreams => "Aspirations, hopes, and future plans",
            RequestTopic::Fears => "Worries, insecurities, and things that scare you",
            RequestTopic::Fun => "Hobbies, entertainment, and favorite things",
            RequestTopic::Deep => "Philosophy, beliefs, and meaningful topics",
            RequestTopic::Secrets => "Hidden truths and personal confessions",
        }
    }

    /// Substrings that mark a question as being about this topic.
    ///
    /// Matched case-insensitively against question text.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            RequestTopic::Love => &[
                "love", "relationship", "partner", "date", "dating", "romantic", "jealous",
                "closer", "attractive", "seduce",
            ],
            RequestTopic::Career => &[
                "work", "job", "career", "success", "ambition", "goal", "money", "student",
                "accomplishment", "five year plan",
            ],
            RequestTopic::Family => &[
                "family", "parent", "childhood", "grew up", "hometown", "inherited", "mother",
                "father", "younger self",
            ],
            RequestTopic::Dreams => &[
                "dream", "wish", "future", "plan", "always wanted", "relive", "perfect day",
                "if you could",
            ],
            RequestTopic::Fears => &[
                "fear", "insecure", "scare", "afraid", "worry", "stress", "apology", "hard for you",
            ],
            RequestTopic::Fun => &[
                "favorite", "favourite", "fun", "song", "celebrity", "dance", "would you rather",
                "zombie", "spirit animal", "rate",
            ],
            RequestTopic::Deep => &[
                "why", "value", "believe", "advice", "meaning", "changed", "turning point",
                "define", "lie",
            ],
            RequestTopic::Secrets => &[
                "secret", "never told", "confess", "illegal", "embarrassing", "haven't shared",
                "lie",
            ],
        }
    }
}

impl fmt::Display for RequestTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RequestTopic {
    type Err = DomainError;

    /// Accepts the display name or its first word (`love`, `career`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        RequestTopic::all()
            .iter()
            .copied()
            .find(|topic| {
                let name = topic.display_name().to_lowercase();
                name == lowered || name.split_whitespace().next() == Some(lowered.as_str())
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown request topic: '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_parse() {
        assert_eq!("love".parse::<RequestTopic>(), Ok(RequestTopic::Love));
        assert_eq!(
            "Secrets & Confessions".parse::<RequestTopic>(),
            Ok(RequestTopic::Secrets)
        );
        assert_eq!("deep".parse::<RequestTopic>(), Ok(RequestTopic::Deep));
        assert!("gossip".parse::<RequestTopic>().is_err());
    }

    #[test]
    fn test_every_topic_has_keywords() {
        for topic in RequestTopic::all() {
            assert!(!topic.keywords().is_empty(), "{topic} has no keywords");
        }
    }

    #[test]
    fn test_topic_wire_name() {
        assert_eq!(
            serde_json::to_string(&RequestTopic::Fears).expect("serialize"),
            "\"Fears & Insecurities\""
        );
    }
}

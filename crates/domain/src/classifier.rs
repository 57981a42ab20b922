//! Question classification
//!
//! Selection needs two facts about a question: which moods it fits and how
//! much energy it asks of the table. Both come from a [`QuestionClassifier`]
//! so the keyword heuristic below can be replaced without touching the
//! selection algorithm.

use crate::common::contains_any_ignore_case;
use crate::entities::Question;
use crate::types::SessionMood;
use crate::value_objects::{clamp_level, DEFAULT_ENERGY_LEVEL};

/// Questions longer than this (in characters) take more energy to answer
pub const LONG_QUESTION_CHARS: usize = 100;

/// How far a question's energy requirement may sit from the session level
pub const ENERGY_TOLERANCE: u8 = 2;

const CHILL_KEYWORDS: &[&str] = &[
    "favorite", "favourite", "relax", "perfect day", "song", "alone time", "hometown",
    "enjoy", "spend", "cooking", "value most",
];

const DEEP_KEYWORDS: &[&str] = &[
    "why", "value", "dream", "fear", "insecure", "advice", "learn", "changed",
    "turning point", "success", "believe", "grateful", "gratitude", "feel", "proud",
];

const WILD_KEYWORDS: &[&str] = &[
    "sex", "turn-on", "illegal", "secret", "seduce", "sleep with", "jealous", "risk",
    "lie", "free pass", "attractive",
];

const FUNNY_KEYWORDS: &[&str] = &[
    "would you rather", "rate", "scale of", "zombie", "embarrassing", "funniest",
    "google review", "spirit animal", "duck", "dance", "sing", "reality tv", "ick",
];

const HIGH_INTENSITY_KEYWORDS: &[&str] = &[
    "sex", "turn-on", "illegal", "secret", "seduce", "sleep with", "jealous", "dare",
    "never told", "wild",
];

const CALM_KEYWORDS: &[&str] = &[
    "relax", "calm", "favorite", "favourite", "perfect day", "alone time", "song",
    "hometown", "enjoy",
];

const DEPTH_KEYWORDS: &[&str] = &[
    "why", "meaning", "value", "believe", "dream", "fear", "advice", "life", "insecure",
    "changed",
];

/// What a classifier knows about a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Moods the question fits; empty means it fits none in particular
    pub moods: Vec<SessionMood>,
    /// Energy level (1..=10) the table needs to enjoy the question
    pub energy_requirement: u8,
}

impl Classification {
    /// `All` fits everything
    pub fn fits_mood(&self, mood: SessionMood) -> bool {
        !mood.is_filter() || self.moods.contains(&mood)
    }

    pub fn fits_energy(&self, level: u8) -> bool {
        self.energy_requirement.abs_diff(level) <= ENERGY_TOLERANCE
    }
}

/// Pure function from a question to its classification
pub trait QuestionClassifier: Send + Sync {
    fn classify(&self, question: &Question) -> Classification;
}

/// Substring heuristic over the question text.
///
/// Explicit mood tags (set by players on custom questions) are always
/// honored on top of keyword matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn moods(question: &Question) -> Vec<SessionMood> {
        let mut moods: Vec<SessionMood> = question.mood_tags().to_vec();
        for mood in SessionMood::taggable() {
            if !moods.contains(mood) && contains_any_ignore_case(question.text(), mood_keywords(*mood))
            {
                moods.push(*mood);
            }
        }
        moods
    }

    /// Base 5, +1 long, +2 intense, -1 calm, +1 deep; clamped to 1..=10
    fn energy_requirement(question: &Question) -> u8 {
        let text = question.text();
        let mut requirement = i32::from(DEFAULT_ENERGY_LEVEL);
        if text.chars().count() > LONG_QUESTION_CHARS {
            requirement += 1;
        }
        if contains_any_ignore_case(text, HIGH_INTENSITY_KEYWORDS) {
            requirement += 2;
        }
        if contains_any_ignore_case(text, CALM_KEYWORDS) {
            requirement -= 1;
        }
        if contains_any_ignore_case(text, DEPTH_KEYWORDS) {
            requirement += 1;
        }
        clamp_level(requirement)
    }
}

impl QuestionClassifier for KeywordClassifier {
    fn classify(&self, question: &Question) -> Classification {
        Classification {
            moods: Self::moods(question),
            energy_requirement: Self::energy_requirement(question),
        }
    }
}

fn mood_keywords(mood: SessionMood) -> &'static [&'static str] {
    match mood {
        SessionMood::Chill => CHILL_KEYWORDS,
        SessionMood::Deep => DEEP_KEYWORDS,
        SessionMood::Wild => WILD_KEYWORDS,
        SessionMood::Funny => FUNNY_KEYWORDS,
        SessionMood::All => &[],
    }
}

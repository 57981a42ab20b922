//! Per-game session configuration

use serde::{Deserialize, Serialize};

use crate::types::SessionMood;

pub const DEFAULT_INTENSITY: u8 = 5;

/// Mood and intensity chosen when a game starts.
///
/// Fixed for the lifetime of a round; changing it means starting a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    mood: SessionMood,
    intensity: u8,
}

impl SessionConfig {
    /// Intensity is clamped into 1..=10
    pub fn new(mood: SessionMood, intensity: u8) -> Self {
        Self {
            mood,
            intensity: intensity.clamp(1, 10),
        }
    }

    pub fn mood(&self) -> SessionMood {
        self.mood
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// The mood to filter by, or `None` for the `All` bypass
    pub fn mood_filter(&self) -> Option<SessionMood> {
        self.mood.is_filter().then_some(self.mood)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(SessionMood::All, DEFAULT_INTENSITY)
    }
}

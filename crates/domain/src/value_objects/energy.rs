//! Session energy value objects
//!
//! Energy is a 1-10 heuristic of how lively the table is. It is derived
//! from [`InteractionMetrics`] by the estimator and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_ENERGY_LEVEL: u8 = 1;
pub const MAX_ENERGY_LEVEL: u8 = 10;
pub const DEFAULT_ENERGY_LEVEL: u8 = 5;

/// Assumed time per question before anything has been answered
pub const DEFAULT_RESPONSE_TIME_MS: f64 = 30_000.0;

/// Clamp any signed level into 1..=10
pub fn clamp_level(level: i32) -> u8 {
    // The clamp bounds fit in u8, so the cast is lossless.
    level.clamp(i32::from(MIN_ENERGY_LEVEL), i32::from(MAX_ENERGY_LEVEL)) as u8
}

/// Direction of the last published change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl EnergyTrend {
    /// Trend of moving from `previous` to `next`
    pub fn between(previous: u8, next: u8) -> Self {
        match next.cmp(&previous) {
            std::cmp::Ordering::Greater => EnergyTrend::Increasing,
            std::cmp::Ordering::Less => EnergyTrend::Decreasing,
            std::cmp::Ordering::Equal => EnergyTrend::Stable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyFactorKind {
    TimeOfDay,
    SessionLength,
    InteractionRate,
    PlayerEngagement,
}

/// One named, weighted contribution to the energy score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyFactor {
    #[serde(rename = "type")]
    pub kind: EnergyFactorKind,
    pub value: u8,
    pub weight: f64,
}

/// Published energy snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEnergy {
    pub level: u8,
    pub trend: EnergyTrend,
    pub factors: Vec<EnergyFactor>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl SessionEnergy {
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            level: DEFAULT_ENERGY_LEVEL,
            trend: EnergyTrend::Stable,
            factors: Vec::new(),
            last_updated: now,
        }
    }
}

/// Events that feed the interaction metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// A question was answered, optionally with how long it took
    QuestionAnswered { response_time_ms: Option<u64> },
    WildcardUsed,
}

/// Running counters for one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionMetrics {
    pub questions_answered: u32,
    /// Running mean in milliseconds
    pub average_response_time: f64,
    pub wildcard_usage: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub session_start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_interaction_time: DateTime<Utc>,
}

impl InteractionMetrics {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            questions_answered: 0,
            average_response_time: DEFAULT_RESPONSE_TIME_MS,
            wildcard_usage: 0,
            session_start_time: now,
            last_interaction_time: now,
        }
    }

    /// Fold one interaction into the counters.
    ///
    /// The average uses the incremental mean `avg += (x - avg) / (n + 1)`,
    /// where `n` is the count before this answer. A missing or zero
    /// response time leaves the average untouched.
    pub fn record(&mut self, kind: InteractionKind, now: DateTime<Utc>) {
        match kind {
            InteractionKind::QuestionAnswered { response_time_ms } => {
                if let Some(sample) = response_time_ms.filter(|ms| *ms > 0) {
                    let n = f64::from(self.questions_answered);
                    self.average_response_time +=
                        (sample as f64 - self.average_response_time) / (n + 1.0);
                }
                self.questions_answered += 1;
            }
            InteractionKind::WildcardUsed => {
                self.wildcard_usage += 1;
            }
        }
        self.last_interaction_time = now;
    }

    /// Wildcards per answered question (the denominator is at least 1)
    pub fn wildcard_ratio(&self) -> f64 {
        f64::from(self.wildcard_usage) / f64::from(self.questions_answered.max(1))
    }
}

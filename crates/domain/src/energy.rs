//! Session energy estimation
//!
//! The estimator folds interaction events into [`InteractionMetrics`] and
//! derives a published [`SessionEnergy`] from four weighted factors plus a
//! manual offset the players control. Recomputing is a pure function of the
//! accumulated state and the supplied time, so timer ticks and
//! interaction-driven recomputes can interleave freely.

use chrono::{DateTime, Utc};

use crate::value_objects::{
    clamp_level, EnergyFactor, EnergyFactorKind, EnergyTrend, InteractionKind,
    InteractionMetrics, SessionEnergy,
};

/// Bound on the accumulated manual offset, in either direction
pub const MAX_MANUAL_OFFSET: i32 = 9;

/// Fixed weights of the four energy factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWeights {
    pub time_of_day: f64,
    pub session_length: f64,
    pub interaction_rate: f64,
    pub engagement: f64,
}

impl Default for EnergyWeights {
    fn default() -> Self {
        Self {
            time_of_day: 0.2,
            session_length: 0.3,
            interaction_rate: 0.3,
            engagement: 0.2,
        }
    }
}

/// Evening tables run hot, mornings and late nights run cold
pub fn time_of_day_factor(hour: u32) -> u8 {
    match hour {
        6..=11 => 4,
        12..=18 => 6,
        19..=23 => 8,
        _ => 3,
    }
}

pub fn session_length_factor(elapsed_minutes: i64) -> u8 {
    match elapsed_minutes {
        m if m < 15 => 7,
        m if m < 45 => 6,
        m if m < 90 => 4,
        _ => 3,
    }
}

/// Compare the current pause against the running average response time
pub fn interaction_rate_factor(since_last_ms: f64, average_response_ms: f64) -> u8 {
    if since_last_ms < average_response_ms * 0.8 {
        8
    } else if since_last_ms < average_response_ms * 1.2 {
        6
    } else {
        3
    }
}

/// Heavy wildcard use reads as disengagement, some use as healthy play
pub fn engagement_factor(wildcard_ratio: f64) -> u8 {
    if wildcard_ratio > 0.3 {
        3
    } else if wildcard_ratio > 0.1 {
        7
    } else {
        5
    }
}

/// Energy state for one play session
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyEstimator {
    metrics: InteractionMetrics,
    manual_offset: i32,
    energy: SessionEnergy,
    weights: EnergyWeights,
}

impl EnergyEstimator {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_weights(now, EnergyWeights::default())
    }

    pub fn with_weights(now: DateTime<Utc>, weights: EnergyWeights) -> Self {
        Self {
            metrics: InteractionMetrics::new(now),
            manual_offset: 0,
            energy: SessionEnergy::initial(now),
            weights,
        }
    }

    pub fn metrics(&self) -> &InteractionMetrics {
        &self.metrics
    }

    pub fn manual_offset(&self) -> i32 {
        self.manual_offset
    }

    /// The last published snapshot
    pub fn snapshot(&self) -> &SessionEnergy {
        &self.energy
    }

    pub fn level(&self) -> u8 {
        self.energy.level
    }

    /// The four factors for the given instant, in publication order
    pub fn factors(&self, now: DateTime<Utc>, local_hour: u32) -> Vec<EnergyFactor> {
        let elapsed_minutes = (now - self.metrics.session_start_time).num_minutes();
        let since_last_ms = (now - self.metrics.last_interaction_time).num_milliseconds() as f64;

        vec![
            EnergyFactor {
                kind: EnergyFactorKind::TimeOfDay,
                value: time_of_day_factor(local_hour),
                weight: self.weights.time_of_day,
            },
            EnergyFactor {
                kind: EnergyFactorKind::SessionLength,
                value: session_length_factor(elapsed_minutes),
                weight: self.weights.session_length,
            },
            EnergyFactor {
                kind: EnergyFactorKind::InteractionRate,
                value: interaction_rate_factor(since_last_ms, self.metrics.average_response_time),
                weight: self.weights.interaction_rate,
            },
            EnergyFactor {
                kind: EnergyFactorKind::PlayerEngagement,
                value: engagement_factor(self.metrics.wildcard_ratio()),
                weight: self.weights.engagement,
            },
        ]
    }

    /// Recompute and publish the level.
    ///
    /// The weighted mean is rounded and clamped, the manual offset added,
    /// and the sum clamped again. The trend compares against the previously
    /// published level.
    pub fn recompute(&mut self, now: DateTime<Utc>, local_hour: u32) -> &SessionEnergy {
        let factors = self.factors(now, local_hour);

        let total_weight: f64 = factors.iter().map(|f| f.weight).sum();
        let weighted: f64 = factors.iter().map(|f| f64::from(f.value) * f.weight).sum();
        let mean = if total_weight > 0.0 {
            weighted / total_weight
        } else {
            f64::from(self.energy.level)
        };

        let base = clamp_level(mean.round() as i32);
        let level = clamp_level(i32::from(base) + self.manual_offset);

        self.energy = SessionEnergy {
            level,
            trend: EnergyTrend::between(self.energy.level, level),
            factors,
            last_updated: now,
        };
        &self.energy
    }

    /// Bias future recomputes towards `target` and publish it immediately.
    pub fn override_level(&mut self, target: i32, now: DateTime<Utc>) -> &SessionEnergy {
        let current = i32::from(self.energy.level);
        self.manual_offset = self
            .manual_offset
            .saturating_add(target)
            .saturating_sub(current)
            .clamp(-MAX_MANUAL_OFFSET, MAX_MANUAL_OFFSET);

        self.energy.level = clamp_level(target);
        self.energy.trend = EnergyTrend::Stable;
        self.energy.last_updated = now;
        &self.energy
    }

    /// Manual +1/-1 adjustment relative to the published level
    pub fn step(&mut self, delta: i32, now: DateTime<Utc>) -> &SessionEnergy {
        let target = i32::from(self.energy.level).saturating_add(delta);
        self.override_level(target, now)
    }

    /// Fold an interaction into the metrics, then recompute.
    pub fn record_interaction(
        &mut self,
        kind: InteractionKind,
        now: DateTime<Utc>,
        local_hour: u32,
    ) -> &SessionEnergy {
        self.metrics.record(kind, now);
        self.recompute(now, local_hour)
    }
}

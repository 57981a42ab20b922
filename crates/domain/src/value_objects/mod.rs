//! Value objects
//!
//! Immutable (or derived) data describing how a session is configured and
//! how lively it currently is.

mod energy;
mod session_config;

pub use energy::{
    clamp_level, EnergyFactor, EnergyFactorKind, EnergyTrend, InteractionKind,
    InteractionMetrics, SessionEnergy, DEFAULT_ENERGY_LEVEL, DEFAULT_RESPONSE_TIME_MS,
    MAX_ENERGY_LEVEL, MIN_ENERGY_LEVEL,
};
pub use session_config::{SessionConfig, DEFAULT_INTENSITY};

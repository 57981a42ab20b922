//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across stores and domain rules to fulfill user stories.

pub mod energy;
pub mod selection;

// Re-export main types
pub use energy::{EnergyMonitor, DEFAULT_ENERGY_TICK};
pub use selection::QuestionSelectionEngine;

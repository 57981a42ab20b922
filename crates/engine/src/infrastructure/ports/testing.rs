//! Testability ports for injecting time and randomness.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Hour of the local wall clock (0..=23), used for time-of-day energy
    fn local_hour(&self) -> u32;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform index in `0..upper`; `upper` is never zero
    fn gen_index(&self, upper: usize) -> usize;
    fn gen_uuid(&self) -> Uuid;
}

//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Local, Timelike, Utc};
use uuid::Uuid;

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_index(&self, upper: usize) -> usize {
        use rand::Rng;
        if upper <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
    pub hour: u32,
}

#[cfg(test)]
impl FixedClock {
    /// A clock whose local hour is the UTC hour of `now`
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            hour: now.hour(),
        }
    }
}

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn local_hour(&self) -> u32 {
        self.hour
    }
}

/// Fixed random for testing: always picks the last index, which leaves
/// Fisher–Yates shuffles in their original order.
#[cfg(test)]
pub struct FixedRandom;

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_index(&self, upper: usize) -> usize {
        upper.saturating_sub(1)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

//! Common test helpers for building deterministic apps.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{evening, memory_app};
//!
//! #[tokio::test]
//! async fn test_first_date_deck() {
//!     let (app, _storage) = memory_app(evening());
//!     // ... test logic
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::app::App;
use crate::infrastructure::clock::{FixedClock, SystemRandom};
use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::infrastructure::storage::MemoryStorage;

// =============================================================================
// Clocks
// =============================================================================

/// 2024-06-01 20:00 UTC, in the evening energy band
pub fn evening() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
}

/// A fixed clock reporting `hour` as the local hour
pub fn clock_at(now: DateTime<Utc>, hour: u32) -> Arc<FixedClock> {
    Arc::new(FixedClock { now, hour })
}

// =============================================================================
// Randomness
// =============================================================================

/// Replays scripted indices, then falls back to the last index.
///
/// Indices are reduced modulo `upper` so any script stays in range.
pub struct ScriptedRandom {
    picks: Mutex<VecDeque<usize>>,
}

impl ScriptedRandom {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: Mutex::new(picks.into_iter().collect()),
        }
    }
}

impl RandomPort for ScriptedRandom {
    fn gen_index(&self, upper: usize) -> usize {
        let next = self.picks.lock().unwrap().pop_front();
        match next {
            Some(pick) => pick % upper.max(1),
            None => upper.saturating_sub(1),
        }
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

// =============================================================================
// Apps
// =============================================================================

/// An app over fresh in-memory storage with real shuffling.
///
/// The storage handle is returned so tests can reopen an app over the same
/// documents.
pub fn memory_app(clock: Arc<dyn ClockPort>) -> (App, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let app = App::new(storage.clone(), clock, Arc::new(SystemRandom::new()));
    (app, storage)
}

/// An app over fresh in-memory storage whose shuffles replay `picks`.
pub fn scripted_app(
    clock: Arc<dyn ClockPort>,
    picks: impl IntoIterator<Item = usize>,
) -> (App, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let app = App::new(storage.clone(), clock, Arc::new(ScriptedRandom::new(picks)));
    (app, storage)
}

/// Reopen an app over existing storage, as a restart would.
pub fn reopen_app(storage: Arc<MemoryStorage>, clock: Arc<dyn ClockPort>) -> App {
    App::new(storage, clock, Arc::new(SystemRandom::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_random_replays_then_falls_back() {
        let random = ScriptedRandom::new([0, 7, 2]);
        assert_eq!(random.gen_index(5), 0);
        assert_eq!(random.gen_index(5), 2);
        assert_eq!(random.gen_index(5), 2);
        assert_eq!(random.gen_index(5), 4);
    }
}

//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Key-value persistence (could swap a JSON file -> browser storage or SQLite)
//! - Clock/Random (for testing)

mod error;
mod storage;
mod testing;

pub use error::StorageError;
pub use storage::{storage_keys, StoragePort};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use storage::MockStoragePort;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

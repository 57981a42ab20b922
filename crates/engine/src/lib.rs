//! Connection Cards engine library.
//!
//! This crate contains all stateful and I/O code for the card game.
//!
//! ## Structure
//!
//! - `stores/` - Persisted custom questions and in-memory topic requests
//! - `use_cases/` - Deck selection and live energy estimation
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

/// E2E tests driving a full app over in-memory storage.
#[cfg(test)]
mod e2e_tests;

pub use app::{App, TurnOutcome};

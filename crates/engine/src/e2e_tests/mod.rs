//! Engine E2E tests.
//!
//! These tests drive a complete `App` over in-memory storage:
//! - Deck building with icebreakers and repeat fallback
//! - Session persistence, expiry and reset
//! - Energy estimation fed by real turns
//! - Custom questions and topic requests flowing into play
//!
//! # Running E2E Tests
//!
//! ```bash
//! cargo test -p connection-cards-engine --lib e2e_tests
//! ```

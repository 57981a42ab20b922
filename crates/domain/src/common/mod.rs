//! Common utility functions shared across the domain.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no side effects, no I/O
//! - **Minimal dependencies** - standard library only

pub mod string;

// Re-export commonly used functions at crate root for convenience
pub use string::{contains_any_ignore_case, none_if_blank, StringExt};

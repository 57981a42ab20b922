//! Key-value persistence port.

use super::error::StorageError;

/// Fixed keys under which the engine persists its documents
pub mod storage_keys {
    /// `{ usedQuestions, sessionId, startTime }`
    pub const SESSION: &str = "connection-cards-session";
    /// Array of custom questions
    pub const CUSTOM_QUESTIONS: &str = "connection-cards-custom-questions";
}

/// Whole-document string storage.
///
/// Values are JSON documents written in full on every save; there is exactly
/// one writer per key.
#[cfg_attr(test, mockall::automock)]
pub trait StoragePort: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

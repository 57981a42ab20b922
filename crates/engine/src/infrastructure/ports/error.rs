//! Error types for port operations.

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error in {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The backing document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The in-memory cache lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned: {0}")]
    Lock(String),
}

impl StorageError {
    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn lock(message: impl ToString) -> Self {
        Self::Lock(message.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

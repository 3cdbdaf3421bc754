use std::path::PathBuf;

/// Errors from profile store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored value could not be encoded or decoded.
    #[error("serialization error for key {key}: {reason}")]
    Serialization { key: String, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The profile file exists but is not a JSON object of strings.
    #[error("corrupt profile file {path}: {reason}")]
    CorruptProfile { path: PathBuf, reason: String },

    /// The internal lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

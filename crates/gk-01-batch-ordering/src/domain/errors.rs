//! Error types for Batch Ordering

use thiserror::Error;

/// All errors that can occur while encoding, ordering or chunking Events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// Operation carries no signature, so it has no signing time
    #[error("Event {position} has no signing timestamp")]
    MissingTimestamp { position: usize },

    /// Signing time is not a valid RFC 3339 instant
    #[error("Event {position} has invalid signing timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        position: usize,
        value: String,
        reason: String,
    },

    /// Chunk size must be positive
    #[error("Chunk size must be at least 1")]
    InvalidChunkSize,

    /// Value could not be encoded as JSON
    #[error("Canonical encoding failed: {0}")]
    Codec(String),
}

impl From<serde_json::Error> for OrderingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

//! Error types for Registry Queue

use gk_01_batch_ordering::OrderingError;
use shared_types::{AssetError, LedgerError};
use thiserror::Error;

use super::entities::BatchId;

/// All errors that can occur in queue management
#[derive(Debug, Clone, Error)]
pub enum QueueError {
    /// Event is routed to a different registry
    #[error("Event routed to '{found}', expected '{expected}'")]
    RegistryMismatch { expected: String, found: String },

    /// A newer snapshot exists for this registry
    #[error("Batch {requested} for '{registry}' is older than latest snapshot {latest}")]
    StaleSnapshot {
        registry: String,
        requested: BatchId,
        latest: BatchId,
    },

    /// Batch asset does not hold an array of Events
    #[error("Batch {batch_id} is malformed: {reason}")]
    MalformedBatch { batch_id: BatchId, reason: String },

    #[error("Ordering failed: {0}")]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Asset store error: {0}")]
    Asset(#[from] AssetError),

    #[error("Encoding failed: {0}")]
    Codec(String),
}

impl QueueError {
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Ledger(e) => e.is_transport(),
            Self::Asset(e) => e.is_transport(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for QueueError {
    fn from(e: serde_json::Error) -> Self {
        Self::Codec(e.to_string())
    }
}

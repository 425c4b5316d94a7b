//! Error types for Bulk Transfer

use gk_01_batch_ordering::OrderingError;
use gk_02_batch_import::ImportError;
use shared_types::LedgerError;
use thiserror::Error;

/// All errors that can occur in bulk transfer
#[derive(Debug, Clone, Error)]
pub enum TransferError {
    #[error("Ordering failed: {0}")]
    Ordering(#[from] OrderingError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// An exported history could not be placed in signing-time order
    #[error("History of {did} cannot be ordered: {source}")]
    History { did: String, source: OrderingError },

    /// Node returned a different number of histories than DIDs requested
    #[error("Export returned {returned} histories for {requested} DIDs")]
    ExportMismatch { requested: usize, returned: usize },

    /// Recorded batch is not an array of Events or Operations
    #[error("Malformed batch payload: {0}")]
    MalformedPayload(String),
}

impl TransferError {
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Import(e) => e.is_transport(),
            Self::Ledger(e) => e.is_transport(),
            _ => false,
        }
    }
}

//! Error types for Batch Import

use shared_types::{ImportResult, LedgerError};
use thiserror::Error;

/// All errors that can occur in a chunked import
#[derive(Debug, Clone, Error)]
pub enum ImportError {
    /// Chunk size must be positive
    #[error("Chunk size must be at least 1")]
    InvalidChunkSize,

    /// One or more chunks could not be submitted.
    ///
    /// `failed_chunks` lists every chunk that failed or was never attempted;
    /// resubmitting exactly those completes the import.
    #[error(
        "{} of {total_chunks} chunks not imported ({imported} so far): {source}",
        failed_chunks.len()
    )]
    ChunksFailed {
        imported: ImportResult,
        failed_chunks: Vec<usize>,
        total_chunks: usize,
        #[source]
        source: LedgerError,
    },
}

impl ImportError {
    /// Counters confirmed before the failure.
    pub fn imported(&self) -> ImportResult {
        match self {
            Self::InvalidChunkSize => ImportResult::default(),
            Self::ChunksFailed { imported, .. } => *imported,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ChunksFailed { source, .. } if source.is_transport())
    }
}

//! Core entities for Batch Import

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_types::ImportResult;

/// Outcome of one submitted chunk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkReport {
    /// Position of the chunk in the ordered sequence
    pub index: usize,
    /// Events in the chunk
    pub events: usize,
    /// Counters reported by the ledger node
    pub result: ImportResult,
    /// Wall time of the submission
    pub elapsed: Duration,
}

/// Accumulated outcome of a chunked import
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Sum over every chunk
    pub total: ImportResult,
    /// Per-chunk outcomes in chunk order
    pub chunks: Vec<ChunkReport>,
}

impl ImportReport {
    pub fn from_chunks(mut chunks: Vec<ChunkReport>) -> Self {
        chunks.sort_by_key(|c| c.index);
        let total = chunks.iter().map(|c| c.result).sum();
        Self { total, chunks }
    }

    pub fn event_count(&self) -> usize {
        self.chunks.iter().map(|c| c.events).sum()
    }
}

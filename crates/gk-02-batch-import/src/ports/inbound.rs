//! Inbound Ports (Driving Ports / API)

use async_trait::async_trait;
use shared_types::{Event, ImportResult};

use crate::domain::entities::ImportReport;
use crate::domain::errors::ImportError;

/// Primary Batch Import API
#[async_trait]
pub trait BatchImportApi: Send + Sync {
    /// Submit Events as a single request.
    ///
    /// An empty slice yields `{0,0,0}` without contacting the ledger node.
    async fn import_batch(&self, events: &[Event]) -> Result<ImportResult, ImportError>;

    /// Submit already-ordered Events in chunks of `chunk_size`, returning
    /// the counters summed across chunks.
    async fn import_chunked(
        &self,
        events: &[Event],
        chunk_size: usize,
    ) -> Result<ImportResult, ImportError> {
        Ok(self.import_with_report(events, chunk_size).await?.total)
    }

    /// Chunked import using the implementation's configured chunk size.
    async fn import_configured(&self, events: &[Event]) -> Result<ImportReport, ImportError>;

    /// Like [`import_chunked`](Self::import_chunked) but keeps per-chunk outcomes.
    async fn import_with_report(
        &self,
        events: &[Event],
        chunk_size: usize,
    ) -> Result<ImportReport, ImportError>;
}

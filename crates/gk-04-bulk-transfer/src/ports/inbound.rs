//! Inbound Ports (Driving Ports / API)

use async_trait::async_trait;
use gk_01_batch_ordering::Fingerprint;
use serde_json::Value;
use shared_types::{DidHistory, ImportResult};

use crate::domain::entities::BatchFile;
use crate::domain::errors::TransferError;

/// Primary Bulk Transfer API
#[async_trait]
pub trait BulkTransferApi: Send + Sync {
    /// Every DID with its Event history, sorted by the signing time of
    /// each history's first Event. Empty histories sort last.
    async fn export_all(&self) -> Result<Vec<DidHistory>, TransferError>;

    /// Order a batch file by signing time and import it in chunks.
    async fn import_file(&self, file: BatchFile) -> Result<ImportResult, TransferError>;

    /// Integrity hash of a batch file, independent of its Event order.
    fn hash_file(&self, file: BatchFile) -> Result<Fingerprint, TransferError>;

    /// Replay a recorded batch into `registry` (or the default registry).
    async fn import_replay(
        &self,
        payload: &Value,
        registry: Option<&str>,
    ) -> Result<ImportResult, TransferError>;
}

//! Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use shared_types::{Event, ImportResult, LedgerError};

/// Ledger node import endpoint
///
/// Verifies and stores a batch of Events, reporting per-event outcomes as
/// counters.
#[async_trait]
pub trait BatchImporter: Send + Sync {
    async fn import_batch(&self, events: &[Event]) -> Result<ImportResult, LedgerError>;
}

//! Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{AssetError, Event, LedgerError};

/// Ledger node pending-queue endpoints
///
/// The node owns the queue; `enqueue` and `clear_queue` are atomic there.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Submit an Event's operation; the node appends it to `event.registry`.
    async fn enqueue(&self, event: &Event) -> Result<(), LedgerError>;

    async fn get_queue(&self, registry: &str) -> Result<Vec<Event>, LedgerError>;

    /// Equality-checked removal. `false` if the node refused the set.
    async fn clear_queue(&self, registry: &str, events: &[Event]) -> Result<bool, LedgerError>;
}

/// Content-addressed asset storage (wallet service)
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist a JSON payload, returning its identifier.
    async fn create_asset(&self, data: &Value) -> Result<String, AssetError>;

    async fn resolve_asset(&self, id: &str) -> Result<Value, AssetError>;
}

//! Inbound Ports (Driving Ports / API)

use async_trait::async_trait;
use shared_types::Event;

use crate::domain::entities::{BatchId, BatchOutcome, QueueState};
use crate::domain::errors::QueueError;

/// Primary Registry Queue API
#[async_trait]
pub trait RegistryQueueApi: Send + Sync {
    /// Append an Event to the registry's pending queue.
    async fn enqueue(&self, registry: &str, event: &Event) -> Result<(), QueueError>;

    /// Pending Events in node storage order. Non-destructive.
    async fn peek_queue(&self, registry: &str) -> Result<Vec<Event>, QueueError>;

    /// Snapshot the ordered pending queue into a new batch asset.
    ///
    /// Leaves the queue untouched. An empty queue yields
    /// [`BatchOutcome::Empty`] and writes nothing.
    async fn create_batch(&self, registry: &str) -> Result<BatchOutcome, QueueError>;

    /// Remove exactly `events` (by structural equality) from the queue.
    ///
    /// Clearing an already-absent set succeeds. `false` means the node's
    /// pending state no longer matches; re-derive the queue and retry.
    async fn clear_queue(&self, registry: &str, events: &[Event]) -> Result<bool, QueueError>;

    /// Events held by a previously created batch.
    async fn resolve_batch(&self, batch_id: &BatchId) -> Result<Vec<Event>, QueueError>;

    /// Resolve a batch and clear its Events from the registry queue.
    async fn clear_batch(&self, registry: &str, batch_id: &BatchId) -> Result<bool, QueueError>;

    /// Derive the registry's state from a fresh read, relative to
    /// `snapshot` or the latest batch created by this manager.
    async fn queue_state(
        &self,
        registry: &str,
        snapshot: Option<&BatchId>,
    ) -> Result<QueueState, QueueError>;
}

//! Registry Queue Manager
//!
//! Main service implementing RegistryQueueApi.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use gk_01_batch_ordering::order_events;
use parking_lot::Mutex;
use shared_types::Event;
use tracing::{debug, info, warn};

use crate::domain::entities::{BatchId, BatchOutcome, QueueState};
use crate::domain::errors::QueueError;
use crate::ports::inbound::RegistryQueueApi;
use crate::ports::outbound::{AssetStore, QueueStore};

/// Registry Queue Manager
///
/// Drives the snapshot-then-clear cycle against the ledger node's queue.
/// The only local state is the latest batch id created per registry,
/// used to refuse clears with an older snapshot.
pub struct RegistryQueueManager {
    queue: Arc<dyn QueueStore>,
    assets: Arc<dyn AssetStore>,
    snapshots: Mutex<HashMap<String, BatchId>>,
}

impl RegistryQueueManager {
    pub fn new(queue: Arc<dyn QueueStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            queue,
            assets,
            snapshots: Mutex::new(HashMap::new()),
        }
    }

    /// Latest batch created for `registry` by this manager.
    pub fn latest_snapshot(&self, registry: &str) -> Option<BatchId> {
        self.snapshots.lock().get(registry).cloned()
    }

    fn check_registry(registry: &str, events: &[Event]) -> Result<(), QueueError> {
        match events.iter().find(|e| e.registry != registry) {
            Some(stray) => Err(QueueError::RegistryMismatch {
                expected: registry.to_string(),
                found: stray.registry.clone(),
            }),
            None => Ok(()),
        }
    }

    fn count_pending(pending: &[Event], events: &[Event]) -> usize {
        events.iter().filter(|e| pending.contains(e)).count()
    }
}

#[async_trait]
impl RegistryQueueApi for RegistryQueueManager {
    async fn enqueue(&self, registry: &str, event: &Event) -> Result<(), QueueError> {
        Self::check_registry(registry, std::slice::from_ref(event))?;
        self.queue.enqueue(event).await?;
        debug!(registry, kind = %event.operation.kind, "Enqueued event");
        Ok(())
    }

    async fn peek_queue(&self, registry: &str) -> Result<Vec<Event>, QueueError> {
        let events = self.queue.get_queue(registry).await?;
        debug!(registry, pending = events.len(), "Peeked queue");
        Ok(events)
    }

    async fn create_batch(&self, registry: &str) -> Result<BatchOutcome, QueueError> {
        let pending = self.peek_queue(registry).await?;
        if pending.is_empty() {
            info!(registry, "Queue empty, no batch created");
            return Ok(BatchOutcome::Empty);
        }

        let events = order_events(pending)?;
        let payload = serde_json::to_value(&events)?;
        let batch_id = BatchId::from(self.assets.create_asset(&payload).await?);

        info!(registry, batch = %batch_id, events = events.len(), "Created batch");
        self.snapshots
            .lock()
            .insert(registry.to_string(), batch_id.clone());

        Ok(BatchOutcome::Created { batch_id, events })
    }

    async fn clear_queue(&self, registry: &str, events: &[Event]) -> Result<bool, QueueError> {
        Self::check_registry(registry, events)?;

        let pending = self.peek_queue(registry).await?;
        let present = Self::count_pending(&pending, events);
        if present == 0 {
            info!(registry, events = events.len(), "Events already cleared");
            return Ok(true);
        }

        if self.queue.clear_queue(registry, events).await? {
            info!(registry, cleared = present, "Cleared queue");
            return Ok(true);
        }

        // Node refused the set; it may have been cleared concurrently.
        let pending = self.peek_queue(registry).await?;
        let remaining = Self::count_pending(&pending, events);
        if remaining == 0 {
            info!(registry, "Events cleared concurrently");
            Ok(true)
        } else {
            warn!(registry, remaining, "Queue clear mismatch");
            Ok(false)
        }
    }

    async fn resolve_batch(&self, batch_id: &BatchId) -> Result<Vec<Event>, QueueError> {
        let payload = self.assets.resolve_asset(batch_id.as_str()).await?;
        serde_json::from_value(payload).map_err(|e| QueueError::MalformedBatch {
            batch_id: batch_id.clone(),
            reason: e.to_string(),
        })
    }

    async fn clear_batch(&self, registry: &str, batch_id: &BatchId) -> Result<bool, QueueError> {
        if let Some(latest) = self.latest_snapshot(registry) {
            if &latest != batch_id {
                return Err(QueueError::StaleSnapshot {
                    registry: registry.to_string(),
                    requested: batch_id.clone(),
                    latest,
                });
            }
        }

        let events = self.resolve_batch(batch_id).await?;
        let cleared = self.clear_queue(registry, &events).await?;

        if cleared {
            let mut snapshots = self.snapshots.lock();
            if snapshots.get(registry) == Some(batch_id) {
                snapshots.remove(registry);
            }
        }
        Ok(cleared)
    }

    async fn queue_state(
        &self,
        registry: &str,
        snapshot: Option<&BatchId>,
    ) -> Result<QueueState, QueueError> {
        let pending = self.peek_queue(registry).await?;
        let snapshot = snapshot.cloned().or_else(|| self.latest_snapshot(registry));

        if let Some(batch_id) = snapshot {
            let events = self.resolve_batch(&batch_id).await?;
            let in_snapshot = Self::count_pending(&pending, &events);
            if in_snapshot > 0 {
                return Ok(QueueState::Snapshotted {
                    batch_id,
                    pending: pending.len(),
                    in_snapshot,
                });
            }
        }

        Ok(if pending.is_empty() {
            QueueState::Empty
        } else {
            QueueState::Pending {
                pending: pending.len(),
            }
        })
    }
}

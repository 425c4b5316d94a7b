//! # Test Fixtures
//!
//! In-memory stand-ins for the ledger node, the wallet service and the
//! clock. The ledger node applies operations with the node's causal rules:
//! an update or delete for a DID it has never seen is counted as failed.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gk_02_batch_import::BatchImporter;
use gk_03_registry_queue::{AssetStore, QueueStore};
use gk_04_bulk_transfer::{Clock, LedgerExporter};
use parking_lot::Mutex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use shared_types::{
    AssetError, DidQuery, Event, ExportBundle, ImportResult, LedgerError, Operation,
    OperationKind, Ordinal, Signature,
};

// =============================================================================
// EVENT BUILDERS
// =============================================================================

/// Create operation for `did`, signed at `signed`.
pub fn create_op(did: &str, signed: &str) -> Operation {
    Operation::new(OperationKind::Create)
        .with_did(did)
        .with_signature(Signature::new(signed, format!("create-{did}-{signed}"), "sig"))
}

/// Update operation for `did`, signed at `signed`.
pub fn update_op(did: &str, signed: &str) -> Operation {
    Operation::new(OperationKind::Update)
        .with_did(did)
        .with_signature(Signature::new(signed, format!("update-{did}-{signed}"), "sig"))
}

/// Wrap an operation as a queue Event. Enqueue time is fixed on purpose:
/// ordering must never look at it.
pub fn event(registry: &str, operation: Operation, seq: u64) -> Event {
    Event::new(
        registry,
        "2024-07-01T00:00:00.000Z",
        Ordinal::Pair(1_719_792_000_000, seq),
        operation,
    )
}

/// `n` create Events for distinct DIDs, one second apart.
pub fn creates(registry: &str, n: u64) -> Vec<Event> {
    (0..n)
        .map(|i| {
            let signed = format!("2024-07-01T{:02}:{:02}:{:02}Z", i / 3600, (i / 60) % 60, i % 60);
            event(registry, create_op(&format!("did:test:{i}"), &signed), i)
        })
        .collect()
}

// =============================================================================
// LEDGER NODE
// =============================================================================

/// In-memory ledger node.
#[derive(Default)]
pub struct InMemoryLedgerNode {
    queues: Mutex<HashMap<String, Vec<Event>>>,
    dids: Mutex<BTreeMap<String, Vec<Event>>>,
    import_calls: Mutex<Vec<usize>>,
    failing_calls: HashSet<usize>,
    strict_clear: bool,
}

impl InMemoryLedgerNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// `clear_queue` refuses any set that is not entirely pending.
    pub fn strict() -> Self {
        Self {
            strict_clear: true,
            ..Default::default()
        }
    }

    /// Zero-based import calls that fail with a transport error.
    pub fn failing_imports(calls: impl IntoIterator<Item = usize>) -> Self {
        Self {
            failing_calls: calls.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn pending(&self, registry: &str) -> Vec<Event> {
        self.queues.lock().get(registry).cloned().unwrap_or_default()
    }

    pub fn import_sizes(&self) -> Vec<usize> {
        self.import_calls.lock().clone()
    }

    pub fn did_count(&self) -> usize {
        self.dids.lock().len()
    }

    pub fn history(&self, did: &str) -> Vec<Event> {
        self.dids.lock().get(did).cloned().unwrap_or_default()
    }

    fn target_did(operation: &Operation) -> Option<String> {
        operation.did().map(str::to_string).or_else(|| {
            operation
                .signature
                .as_ref()
                .map(|sig| format!("did:test:{}", sig.hash))
        })
    }

    fn apply(&self, event: &Event) -> ImportResult {
        let Some(did) = Self::target_did(&event.operation) else {
            return ImportResult::new(0, 0, 1);
        };
        let mut dids = self.dids.lock();

        match (&event.operation.kind, dids.get_mut(&did)) {
            (OperationKind::Create, None) => {
                dids.insert(did, vec![event.clone()]);
                ImportResult::new(1, 0, 0)
            }
            (OperationKind::Update | OperationKind::Delete, Some(history)) => {
                if history.contains(event) {
                    ImportResult::new(1, 0, 0)
                } else {
                    history.push(event.clone());
                    ImportResult::new(0, 1, 0)
                }
            }
            (OperationKind::Create, Some(history)) if history.first() == Some(event) => {
                ImportResult::new(1, 0, 0)
            }
            _ => ImportResult::new(0, 0, 1),
        }
    }
}

#[async_trait]
impl BatchImporter for InMemoryLedgerNode {
    async fn import_batch(&self, events: &[Event]) -> Result<ImportResult, LedgerError> {
        let call = {
            let mut calls = self.import_calls.lock();
            calls.push(events.len());
            calls.len() - 1
        };
        if self.failing_calls.contains(&call) {
            return Err(LedgerError::Transport("connection reset by peer".to_string()));
        }
        Ok(events.iter().map(|e| self.apply(e)).sum())
    }
}

#[async_trait]
impl QueueStore for InMemoryLedgerNode {
    async fn enqueue(&self, event: &Event) -> Result<(), LedgerError> {
        self.queues
            .lock()
            .entry(event.registry.clone())
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn get_queue(&self, registry: &str) -> Result<Vec<Event>, LedgerError> {
        Ok(self.pending(registry))
    }

    async fn clear_queue(&self, registry: &str, events: &[Event]) -> Result<bool, LedgerError> {
        let mut queues = self.queues.lock();
        let queue = queues.entry(registry.to_string()).or_default();
        if self.strict_clear && !events.iter().all(|e| queue.contains(e)) {
            return Ok(false);
        }
        queue.retain(|e| !events.contains(e));
        Ok(true)
    }
}

#[async_trait]
impl LedgerExporter for InMemoryLedgerNode {
    async fn list_dids(&self, _query: &DidQuery) -> Result<Vec<String>, LedgerError> {
        Ok(self.dids.lock().keys().cloned().collect())
    }

    async fn export_dids(&self, dids: &[String]) -> Result<ExportBundle, LedgerError> {
        let store = self.dids.lock();
        dids.iter()
            .map(|did| {
                store
                    .get(did)
                    .cloned()
                    .ok_or_else(|| LedgerError::NotFound(did.clone()))
            })
            .collect()
    }
}

// =============================================================================
// ASSET STORE
// =============================================================================

/// Content-addressed asset store: the id is the SHA-256 of the payload.
#[derive(Default)]
pub struct InMemoryAssetStore {
    assets: Mutex<HashMap<String, Value>>,
    writes: Mutex<usize>,
}

impl InMemoryAssetStore {
    pub fn writes(&self) -> usize {
        *self.writes.lock()
    }

    pub fn put(&self, data: Value) -> String {
        let id = format!("did:test:{}", hex::encode(Sha256::digest(data.to_string())));
        self.assets.lock().insert(id.clone(), data);
        id
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn create_asset(&self, data: &Value) -> Result<String, AssetError> {
        *self.writes.lock() += 1;
        Ok(self.put(data.clone()))
    }

    async fn resolve_asset(&self, id: &str) -> Result<Value, AssetError> {
        self.assets
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(id.to_string()))
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Clock frozen at one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

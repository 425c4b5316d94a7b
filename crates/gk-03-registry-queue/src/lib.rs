//! # GK-03: Registry Queue Manager
//!
//! Snapshots a registry's pending queue into an immutable batch asset and
//! later clears exactly the anchored Events from the queue.
//!
//! ## State Machine (per registry)
//!
//! ```text
//! [EMPTY] ──enqueue──→ [PENDING] ──create_batch──→ [SNAPSHOTTED]
//!                                                        │
//!                      clear_queue ──→ [EMPTY] or [PENDING] (new enqueues)
//! ```
//!
//! | Stage | Method | Effect |
//! |-------|--------|--------|
//! | Enqueue | `enqueue()` | Node appends Event to the pending queue |
//! | Snapshot | `create_batch()` | Ordered queue persisted as asset, queue untouched |
//! | Clear | `clear_queue()` / `clear_batch()` | Node removes exactly the given Events |
//!
//! Events are NEVER removed when snapshotted. A crash between snapshot and
//! clear leaves them queued for the next cycle.
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Ledger node | `QueueStore` | Pending queue enqueue/read/clear |
//! | Wallet service | `AssetStore` | Content-addressed batch assets |
//!
//! The queue itself is owned by the ledger node and never mirrored here;
//! every destructive call is preceded by a fresh read.

pub mod application;
pub mod domain;
pub mod ports;

pub use application::service::RegistryQueueManager;
pub use domain::entities::{BatchId, BatchOutcome, QueueState};
pub use domain::errors::QueueError;
pub use ports::inbound::RegistryQueueApi;
pub use ports::outbound::{AssetStore, QueueStore};

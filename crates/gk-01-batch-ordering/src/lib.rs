//! # GK-01: Batch Ordering Subsystem
//!
//! Canonical encoding, causal ordering and chunking of queue Events.
//! Pure functions with no I/O; every other subsystem orders and chunks
//! through this crate.
//!
//! ## Architecture
//!
//! - **Domain**: Value objects (OrderingKey, Fingerprint, ChunkSize), errors, invariants
//! - **Algorithms**: Canonical codec, ordering engine, batch chunker
//!
//! ## Ordering
//!
//! Events are totally ordered by:
//! 1. the wrapped operation's signing time (parsed as an instant)
//! 2. the Event ordinal `(coarse, sequence)`
//! 3. the canonical bytes of the Event
//!
//! Signing time is the only causal key; creation and enqueue times are
//! never used for ordering.

pub mod algorithms;
pub mod domain;

pub use algorithms::canonical::{canonicalize, canonicalize_operation, fingerprint, fingerprint_ordered};
pub use algorithms::chunker::chunk;
pub use algorithms::ordering::{order_events, signing_time};
pub use domain::errors::OrderingError;
pub use domain::value_objects::{ChunkSize, Fingerprint, OrderingKey, DEFAULT_CHUNK_SIZE};

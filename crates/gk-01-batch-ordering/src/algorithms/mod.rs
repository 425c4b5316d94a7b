//! Algorithms module for Batch Ordering
//!
//! Contains:
//! - Canonical codec and fingerprint
//! - Ordering engine
//! - Batch chunker

pub mod canonical;
pub mod chunker;
pub mod ordering;

pub use canonical::{canonicalize, fingerprint, fingerprint_ordered};
pub use chunker::chunk;
pub use ordering::order_events;

//! # Shared Types Crate
//!
//! This crate contains the DID ledger data model and the error taxonomy for
//! the two external collaborators (ledger node and asset store).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Operation, Event and ImportResult are
//!   defined once here and reused by every subsystem.
//! - **Structural Fidelity**: Unknown wire fields are preserved, so an Event
//!   read from the ledger node serializes back to an identical document.
//!   Queue eviction relies on this (equality, not identity).
//! - **Typed Options**: Optional filter parameters are explicit structs with
//!   independently optional fields.

pub mod entities;
pub mod errors;
pub mod query;

pub use entities::*;
pub use errors::*;
pub use query::*;

//! Domain module for Batch Ordering
//!
//! Contains value objects, errors, and invariants.

pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;

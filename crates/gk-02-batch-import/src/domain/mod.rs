//! Domain module for Batch Import

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

//! Domain module for Bulk Transfer

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

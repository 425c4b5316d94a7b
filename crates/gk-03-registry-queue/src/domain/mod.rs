//! Domain module for Registry Queue

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

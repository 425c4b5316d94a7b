//! Ports module for Batch Import
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::BatchImportApi;
pub use outbound::BatchImporter;

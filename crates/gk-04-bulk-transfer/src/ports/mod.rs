//! Ports module for Bulk Transfer

pub mod inbound;
pub mod outbound;

pub use inbound::BulkTransferApi;
pub use outbound::{Clock, LedgerExporter, SystemClock};

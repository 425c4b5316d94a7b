//! # GK-02: Batch Import Subsystem
//!
//! Drives chunked submission of ordered Events to the ledger node and
//! accumulates `{verified, updated, failed}` counters across chunks.
//!
//! ## Architecture
//!
//! - **Domain**: Import report entities, errors
//! - **Ports**: Inbound (BatchImportApi) and Outbound (BatchImporter)
//! - **Application**: ImportOrchestrator
//!
//! ## Failure Model
//!
//! Per-event rejections are counted, never raised, and never stop the
//! remaining chunks. A transport failure stops scheduling further chunks
//! and is returned with the counters imported so far and the exact chunk
//! indices still to do. Nothing is retried here.

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::service::ImportOrchestrator;
pub use config::ImportConfig;
pub use domain::entities::{ChunkReport, ImportReport};
pub use domain::errors::ImportError;
pub use ports::inbound::BatchImportApi;
pub use ports::outbound::BatchImporter;

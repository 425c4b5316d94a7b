//! # GK-04: Bulk Transfer Subsystem
//!
//! Moves whole ledger states between nodes.
//!
//! ## Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `export_all` | Every DID with its Event history, sorted by first signing time |
//! | `import_file` | Flatten a batch file, order it, chunked import |
//! | `hash_file` | Flatten a batch file, order it, fingerprint |
//! | `import_replay` | Rewrap recorded operations as fresh Events, chunked import |
//!
//! Import and hash both order by signing time, so the hash of a file
//! identifies exactly the sequence that import submits.

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::service::BulkTransferService;
pub use config::TransferConfig;
pub use domain::entities::{BatchFile, ReplayItem};
pub use domain::errors::TransferError;
pub use ports::inbound::BulkTransferApi;
pub use ports::outbound::{Clock, LedgerExporter, SystemClock};

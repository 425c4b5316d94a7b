//! GK-Admin: Gatekeeper Admin CLI
//!
//! Command-line control of a DID ledger node and its registry queues.
//!
//! ## Architecture
//!
//! The CLI is the outer layer of the hexagonal subsystems: the HTTP
//! clients in `api` implement their outbound ports, and `commands` wires
//! each subcommand onto a subsystem service.
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────────────┐   ┌──────────────────┐
//! │  commands    │──→│  gk-02 ImportOrchestrator │──→│ GatekeeperClient │──→ ledger node
//! │  (clap)      │──→│  gk-03 RegistryQueue      │──→│ KeymasterClient  │──→ wallet service
//! │              │──→│  gk-04 BulkTransfer       │   └──────────────────┘
//! └──────────────┘   └───────────────────────────┘
//! ```
//!
//! Command output goes to stdout, logs to stderr.

pub mod api;
pub mod commands;
pub mod config;

pub use api::{GatekeeperClient, KeymasterClient};
pub use commands::{Admin, Command};
pub use config::{AdminConfig, ConfigError};

//! # GK Telemetry
//!
//! Logging bootstrap shared by the admin binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gk_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GK_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `GK_JSON_LOGS` | `false` | One JSON object per line |
//!
//! Logs are written to stderr; stdout is reserved for command output.

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

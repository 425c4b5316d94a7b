//! Admin tool configuration from environment variables.

use std::env;
use std::time::Duration;

use gk_02_batch_import::ImportConfig;
use gk_04_bulk_transfer::TransferConfig;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

/// Admin tool configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Ledger node base URL
    pub gatekeeper_url: String,

    /// Wallet service base URL (batch asset store)
    pub keymaster_url: String,

    /// Upper bound on any single HTTP request
    pub request_timeout: Duration,

    /// Delay between readiness probes
    pub ready_interval: Duration,

    /// Readiness probes before giving up (`None` waits forever)
    pub ready_attempts: Option<u32>,

    /// Chunked import settings
    pub import: ImportConfig,

    /// Export/replay settings
    pub transfer: TransferConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            gatekeeper_url: "http://localhost:4224".to_string(),
            keymaster_url: "http://localhost:4226".to_string(),
            request_timeout: Duration::from_secs(30),
            ready_interval: Duration::from_secs(1),
            ready_attempts: None,
            import: ImportConfig::default(),
            transfer: TransferConfig::default(),
        }
    }
}

impl AdminConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GK_GATEKEEPER_URL`: Ledger node URL (default: http://localhost:4224)
    /// - `GK_KEYMASTER_URL`: Wallet service URL (default: http://localhost:4226)
    /// - `GK_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
    /// - `GK_READY_ATTEMPTS`: Readiness probes before giving up (default: unlimited)
    /// - plus the `ImportConfig` and `TransferConfig` variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gatekeeper_url: env::var("GK_GATEKEEPER_URL").unwrap_or(defaults.gatekeeper_url),

            keymaster_url: env::var("GK_KEYMASTER_URL").unwrap_or(defaults.keymaster_url),

            request_timeout: env::var("GK_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),

            ready_interval: defaults.ready_interval,

            ready_attempts: env::var("GK_READY_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok()),

            import: ImportConfig::from_env(),
            transfer: TransferConfig::from_env(),
        }
    }

    /// Override the chunk size used by every import path.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.import.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gatekeeper URL", &self.gatekeeper_url),
            ("keymaster URL", &self.keymaster_url),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    name,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

//! Configuration for Bulk Transfer

use serde::{Deserialize, Serialize};
use shared_types::LOCAL_REGISTRY;

/// Bulk transfer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Registry for replayed operations when none is named
    pub default_registry: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            default_registry: LOCAL_REGISTRY.to_string(),
        }
    }
}

impl TransferConfig {
    /// # Environment Variables
    ///
    /// - `GK_DEFAULT_REGISTRY`: Replay target registry (default: local)
    ///
    /// Chunking is the import orchestrator's concern (`ImportConfig`).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_registry: std::env::var("GK_DEFAULT_REGISTRY")
                .ok()
                .filter(|r| !r.is_empty())
                .unwrap_or(defaults.default_registry),
        }
    }
}

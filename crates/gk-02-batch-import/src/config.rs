//! Configuration for Batch Import Subsystem

use std::time::Duration;

use gk_01_batch_ordering::{ChunkSize, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ImportError;

/// Import configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Events per import request
    pub chunk_size: usize,
    /// Chunks submitted concurrently (1 = strictly sequential)
    pub max_concurrent_chunks: usize,
    /// Upper bound on a single chunk submission
    pub chunk_timeout: Option<Duration>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_chunks: 1,
            chunk_timeout: None,
        }
    }
}

impl ImportConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GK_CHUNK_SIZE`: Events per import request (default: 10)
    /// - `GK_MAX_CONCURRENT_CHUNKS`: Parallel chunk submissions (default: 1)
    /// - `GK_CHUNK_TIMEOUT_SECS`: Per-chunk timeout in seconds (default: none)
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unparsable values fall back
    /// to defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            chunk_size: lookup("GK_CHUNK_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.chunk_size),
            max_concurrent_chunks: lookup("GK_MAX_CONCURRENT_CHUNKS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_concurrent_chunks),
            chunk_timeout: lookup("GK_CHUNK_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
        }
    }

    /// Validated chunk size.
    pub fn chunk_size(&self) -> Result<ChunkSize, ImportError> {
        ChunkSize::new(self.chunk_size).map_err(|_| ImportError::InvalidChunkSize)
    }

    /// Concurrency, never below 1.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_chunks.max(1)
    }
}

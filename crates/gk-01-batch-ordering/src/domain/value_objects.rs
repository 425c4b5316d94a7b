//! Value objects for Batch Ordering

use std::fmt;
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::OrderingError;

/// Default number of Events per import request.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Causal ordering key of an Event: signing instant, then ordinal.
///
/// Field order matters: the derived `Ord` compares `signed_at` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderingKey {
    pub signed_at: DateTime<Utc>,
    pub ordinal: (u64, u64),
}

/// SHA-256 digest of a canonically encoded Event sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Positive number of Events per chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    pub fn new(size: usize) -> Result<Self, OrderingError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(OrderingError::InvalidChunkSize)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_CHUNK_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = OrderingError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<ChunkSize> for usize {
    fn from(size: ChunkSize) -> Self {
        size.get()
    }
}

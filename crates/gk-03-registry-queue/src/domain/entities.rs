//! Core entities for Registry Queue

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::Event;

/// Identifier of a batch asset in the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of `create_batch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The pending queue was empty; nothing was written.
    Empty,
    /// A new batch asset holding the ordered Events.
    Created { batch_id: BatchId, events: Vec<Event> },
}

impl BatchOutcome {
    pub fn batch_id(&self) -> Option<&BatchId> {
        match self {
            Self::Empty => None,
            Self::Created { batch_id, .. } => Some(batch_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Observed state of a registry queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueueState {
    Empty,
    Pending {
        pending: usize,
    },
    /// A snapshot exists and some of its Events are still pending.
    Snapshotted {
        batch_id: BatchId,
        pending: usize,
        in_snapshot: usize,
    },
}

impl QueueState {
    pub fn pending(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Pending { pending } | Self::Snapshotted { pending, .. } => *pending,
        }
    }
}

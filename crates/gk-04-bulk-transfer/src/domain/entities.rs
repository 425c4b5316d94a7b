//! Core entities for Bulk Transfer

use serde::{Deserialize, Serialize};
use shared_types::{Event, ExportBundle, Operation};

/// Contents of a batch file accepted by import and hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchFile {
    /// Export bundle: one Event history per DID.
    Bundle(ExportBundle),
    /// Plain Event array.
    Flat(Vec<Event>),
}

impl BatchFile {
    pub fn flatten(self) -> Vec<Event> {
        match self {
            Self::Bundle(histories) => histories.into_iter().flatten().collect(),
            Self::Flat(events) => events,
        }
    }

    pub fn event_count(&self) -> usize {
        match self {
            Self::Bundle(histories) => histories.iter().map(Vec::len).sum(),
            Self::Flat(events) => events.len(),
        }
    }
}

/// One entry of a recorded batch: either an Event written by
/// create-batch or a raw Operation recorded on an external registry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReplayItem {
    Event(Box<Event>),
    Operation(Box<Operation>),
}

impl ReplayItem {
    pub fn into_operation(self) -> Operation {
        match self {
            Self::Event(event) => event.operation,
            Self::Operation(operation) => *operation,
        }
    }
}

//! Domain invariants for Batch Ordering

use std::cmp::Ordering;

use shared_types::{Event, OperationKind};

use crate::algorithms::ordering::compare_events;

/// INVARIANT-1: Total Order
/// Every adjacent pair is non-decreasing under the ordering engine's comparator.
pub fn invariant_total_order(events: &[Event]) -> bool {
    events
        .iter()
        .enumerate()
        .zip(events.iter().enumerate().skip(1))
        .all(|(prev, next)| {
            matches!(
                compare_events(prev, next),
                Ok(Ordering::Less | Ordering::Equal)
            )
        })
}

/// INVARIANT-2: Causal Precedence
/// A DID's create operation precedes every operation naming that DID.
///
/// `did_of_create` maps a create Event to the DID it brings into existence.
pub fn invariant_create_first<F>(events: &[Event], did_of_create: F) -> bool
where
    F: Fn(&Event) -> Option<String>,
{
    let mut created = std::collections::HashSet::new();
    let mut referenced_early = std::collections::HashSet::new();

    for event in events {
        match event.operation.kind {
            OperationKind::Create => {
                if let Some(did) = did_of_create(event) {
                    if referenced_early.contains(&did) {
                        return false;
                    }
                    created.insert(did);
                }
            }
            _ => {
                if let Some(did) = event.operation.did() {
                    if !created.contains(did) {
                        referenced_early.insert(did.to_string());
                    }
                }
            }
        }
    }

    true
}

/// INVARIANT-3: Chunk Concatenation
/// Chunks are contiguous, non-empty, no longer than `size`, only the last may
/// be short, and they concatenate back to the input.
pub fn invariant_chunks_concatenate<T: PartialEq>(original: &[T], chunks: &[&[T]], size: usize) -> bool {
    let bounded = chunks.iter().enumerate().all(|(i, chunk)| {
        !chunk.is_empty() && chunk.len() <= size && (i + 1 == chunks.len() || chunk.len() == size)
    });

    let joined: Vec<&T> = chunks.iter().flat_map(|chunk| chunk.iter()).collect();
    let same = joined.len() == original.len() && joined.iter().zip(original).all(|(a, b)| *a == b);

    bounded && same
}

//! Batch Chunker
//!
//! Splits an ordered sequence into contiguous import units of at most
//! `size` items. The final chunk may be short; an empty input yields no
//! chunks at all.

use crate::domain::invariants::invariant_chunks_concatenate;
use crate::domain::value_objects::ChunkSize;

/// Split `items` into contiguous, non-overlapping chunks.
pub fn chunk<T: PartialEq>(items: &[T], size: ChunkSize) -> Vec<&[T]> {
    let chunks: Vec<&[T]> = items.chunks(size.get()).collect();
    debug_assert!(invariant_chunks_concatenate(items, &chunks, size.get()));
    chunks
}

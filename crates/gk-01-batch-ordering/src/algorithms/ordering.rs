//! Ordering Engine
//!
//! Total-orders queue Events by signing time, then ordinal, then canonical
//! bytes. Signing time (not enqueue time) is the primary key so that a
//! DID's create operation lands before anything that depends on it, even
//! when Events were enqueued out of order or re-imported from elsewhere.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use shared_types::Event;
use tracing::debug;

use crate::algorithms::canonical::canonicalize;
use crate::domain::errors::OrderingError;
use crate::domain::invariants::invariant_total_order;
use crate::domain::value_objects::OrderingKey;

/// Parse the signing time of the Event at `position`.
///
/// Missing or unparsable timestamps are hard errors.
pub fn signing_time(event: &Event, position: usize) -> Result<DateTime<Utc>, OrderingError> {
    let raw = event
        .operation
        .signed()
        .ok_or(OrderingError::MissingTimestamp { position })?;

    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| OrderingError::InvalidTimestamp {
            position,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Ordering key of the Event at `position`.
pub fn ordering_key(event: &Event, position: usize) -> Result<OrderingKey, OrderingError> {
    Ok(OrderingKey {
        signed_at: signing_time(event, position)?,
        ordinal: event.ordinal_key(),
    })
}

/// Compare two positioned Events under the engine's total order.
///
/// Positions only label errors.
pub fn compare_events(
    (pos_a, a): (usize, &Event),
    (pos_b, b): (usize, &Event),
) -> Result<Ordering, OrderingError> {
    let by_key = ordering_key(a, pos_a)?.cmp(&ordering_key(b, pos_b)?);
    if by_key != Ordering::Equal {
        return Ok(by_key);
    }
    Ok(canonicalize(a)?.cmp(&canonicalize(b)?))
}

/// Order Events causally.
///
/// Idempotent, and independent of input order: every permutation of the
/// same Event set produces the same output.
pub fn order_events(events: Vec<Event>) -> Result<Vec<Event>, OrderingError> {
    let mut keyed = events
        .into_iter()
        .enumerate()
        .map(|(position, event)| {
            let key = ordering_key(&event, position)?;
            let bytes = canonicalize(&event)?;
            Ok((key, bytes, event))
        })
        .collect::<Result<Vec<_>, OrderingError>>()?;

    keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let ordered: Vec<Event> = keyed.into_iter().map(|(_, _, event)| event).collect();
    debug_assert!(invariant_total_order(&ordered));
    debug!(event_count = ordered.len(), "Ordered events");

    Ok(ordered)
}

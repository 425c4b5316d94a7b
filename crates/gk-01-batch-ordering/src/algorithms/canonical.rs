//! Canonical JSON codec and Event fingerprint
//!
//! Object keys are sorted by byte order at every depth, no whitespace is
//! emitted, and scalars are written exactly as parsed. Timestamps stay
//! strings, so no clock or float formatting enters the bytes.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use shared_types::{Event, Operation};

use crate::algorithms::ordering::order_events;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::Fingerprint;

/// Encode any serializable value in canonical form.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, OrderingError> {
    let value = serde_json::to_value(value)?;
    let mut out = Vec::with_capacity(256);
    write_canonical(&value, &mut out)?;
    Ok(out)
}

/// Encode an operation in canonical form.
pub fn canonicalize_operation(operation: &Operation) -> Result<Vec<u8>, OrderingError> {
    canonicalize(operation)
}

/// Hash an Event sequence in the order given.
///
/// Order-sensitive by definition: two permutations of the same set hash
/// differently. Use [`fingerprint_ordered`] for the integrity hash.
pub fn fingerprint(events: &[Event]) -> Result<Fingerprint, OrderingError> {
    let bytes = canonicalize(events)?;
    Ok(Fingerprint(Sha256::digest(&bytes).into()))
}

/// Order an Event sequence causally, then hash it.
///
/// Equal for every permutation of the same Event set.
pub fn fingerprint_ordered(events: &[Event]) -> Result<Fingerprint, OrderingError> {
    let ordered = order_events(events.to_vec())?;
    fingerprint(&ordered)
}

fn write_canonical(value: &Value, out: &mut Vec<u8>) -> Result<(), OrderingError> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_canonical(item, out)?;
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(item, out)?;
            }
            out.push(b']');
        }
        scalar => serde_json::to_writer(&mut *out, scalar)?,
    }
    Ok(())
}

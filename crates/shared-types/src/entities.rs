//! # Core Domain Entities
//!
//! Defines the DID ledger entities exchanged with the ledger node.
//!
//! ## Clusters
//!
//! - **Operations**: `Operation`, `OperationKind`, `Signature`
//! - **Queue**: `Event`, `Ordinal`
//! - **Reporting**: `ImportResult`, `DidHistory`

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Default registry used when an operation is replayed without routing.
pub const LOCAL_REGISTRY: &str = "local";

/// One DID's Event history per element, as returned by `export-dids`.
pub type ExportBundle = Vec<Vec<Event>>;

// =============================================================================
// CLUSTER A: OPERATIONS
// =============================================================================

/// The kind of a signed operation.
///
/// Protocol-specific kinds are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationKind {
    Create,
    Update,
    Delete,
    Other(String),
}

impl OperationKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for OperationKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            _ => Self::Other(kind),
        }
    }
}

impl From<OperationKind> for String {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature block attached to every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// DID of the signing identity. Absent on self-signed agent creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    /// ISO 8601 signing time; the primary causal ordering key.
    pub signed: String,
    /// Hash of the signed payload.
    pub hash: String,
    /// Signature value.
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Signature {
    pub fn new(signed: impl Into<String>, hash: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            signer: None,
            signed: signed.into(),
            hash: hash.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// An immutable signed instruction that creates, updates or deletes a DID.
///
/// Fields not modelled here (`did`, `mdip`, `doc`, `prev`, ...) are kept in
/// `extra` and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    /// Opaque payload. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operation {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            created: None,
            controller: None,
            data: None,
            signature: None,
            extra: Map::new(),
        }
    }

    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Set the target DID (update/delete operations carry it on the wire).
    pub fn with_did(mut self, did: impl Into<String>) -> Self {
        self.extra.insert("did".to_string(), Value::String(did.into()));
        self
    }

    /// Target DID, if the operation names one.
    pub fn did(&self) -> Option<&str> {
        self.extra.get("did").and_then(Value::as_str)
    }

    /// Raw signing timestamp, if the operation is signed.
    pub fn signed(&self) -> Option<&str> {
        self.signature.as_ref().map(|sig| sig.signed.as_str())
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// =============================================================================
// CLUSTER B: QUEUE
// =============================================================================

/// Tie-break ordering key for Events sharing a signing time.
///
/// The node writes either `[coarseMillis, sequence]` or a bare integer; the
/// form read is the form written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Ordinal {
    Pair(u64, u64),
    Scalar(u64),
}

impl Ordinal {
    /// Lexicographic comparison key `(coarse, sequence)`.
    pub fn key(&self) -> (u64, u64) {
        match *self {
            Self::Pair(coarse, seq) => (coarse, seq),
            Self::Scalar(coarse) => (coarse, 0),
        }
    }
}

// Read through `Value`: Events are buffered by `#[serde(flatten)]`, and
// buffered numbers only decode reliably as `Value` under arbitrary precision.
impl<'de> Deserialize<'de> for Ordinal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let ordinal = match &value {
            Value::Array(items) => match items.as_slice() {
                [coarse, seq] => coarse
                    .as_u64()
                    .zip(seq.as_u64())
                    .map(|(coarse, seq)| Self::Pair(coarse, seq)),
                _ => None,
            },
            scalar => scalar.as_u64().map(Self::Scalar),
        };
        ordinal.ok_or_else(|| D::Error::custom(format!("invalid ordinal {value}")))
    }
}

/// A queue entry: one Operation routed to an anchoring registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Target anchoring registry name.
    pub registry: String,
    /// ISO timestamp at enqueue.
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<Ordinal>,
    pub operation: Operation,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(
        registry: impl Into<String>,
        time: impl Into<String>,
        ordinal: Ordinal,
        operation: Operation,
    ) -> Self {
        Self {
            registry: registry.into(),
            time: time.into(),
            ordinal: Some(ordinal),
            operation,
            extra: Map::new(),
        }
    }

    /// Ordinal key; a missing ordinal orders as `(0, 0)`.
    pub fn ordinal_key(&self) -> (u64, u64) {
        self.ordinal.map(|o| o.key()).unwrap_or((0, 0))
    }
}

/// A DID paired with its ordered Event history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidHistory {
    pub did: String,
    pub events: Vec<Event>,
}

// =============================================================================
// CLUSTER C: REPORTING
// =============================================================================

/// Outcome counters of submitting Events to the ledger node.
///
/// Per-event failures are counted here, never raised as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    #[serde(default)]
    pub verified: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub failed: u64,
}

impl ImportResult {
    pub fn new(verified: u64, updated: u64, failed: u64) -> Self {
        Self {
            verified,
            updated,
            failed,
        }
    }

    pub fn total(&self) -> u64 {
        self.verified
            .saturating_add(self.updated)
            .saturating_add(self.failed)
    }

    /// True when every submitted event was rejected.
    pub fn fully_rejected(&self) -> bool {
        self.failed > 0 && self.verified == 0 && self.updated == 0
    }
}

impl Add for ImportResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            verified: self.verified.saturating_add(rhs.verified),
            updated: self.updated.saturating_add(rhs.updated),
            failed: self.failed.saturating_add(rhs.failed),
        }
    }
}

impl AddAssign for ImportResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ImportResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} verified, {} updated, {} failed",
            self.verified, self.updated, self.failed
        )
    }
}

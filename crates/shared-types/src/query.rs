//! Typed option structures for ledger node queries.
//!
//! Every field is independently optional and omitted from the wire when
//! unset.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Filter for listing DIDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_after: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_before: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
    /// When true the node returns documents instead of identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<bool>,
}

impl DidQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updated_after(mut self, after: DateTime<Utc>) -> Self {
        self.updated_after = Some(after);
        self
    }

    pub fn updated_before(mut self, before: DateTime<Utc>) -> Self {
        self.updated_before = Some(before);
        self
    }

    pub fn confirm(mut self, confirm: bool) -> Self {
        self.confirm = Some(confirm);
        self
    }

    pub fn resolve(mut self, resolve: bool) -> Self {
        self.resolve = Some(resolve);
        self
    }
}

/// Options for resolving a single DID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub at_time: Option<DateTime<Utc>>,
    pub at_version: Option<u32>,
    pub confirm: Option<bool>,
}

impl ResolveOptions {
    /// Query string pairs, in a fixed order, for the options that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(at_time) = self.at_time {
            pairs.push((
                "atTime",
                at_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            ));
        }
        if let Some(at_version) = self.at_version {
            pairs.push(("atVersion", at_version.to_string()));
        }
        if let Some(confirm) = self.confirm {
            pairs.push(("confirm", confirm.to_string()));
        }
        pairs
    }
}

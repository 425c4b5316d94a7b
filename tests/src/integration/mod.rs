//! Cross-subsystem flows against the in-memory ledger node.

pub mod flows;

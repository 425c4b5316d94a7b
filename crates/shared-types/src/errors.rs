//! # Error Types
//!
//! Errors reported by the external collaborators: the ledger node and the
//! asset store. Resolution failures and transport failures are distinct
//! kinds so callers can decide on retry.

use std::time::Duration;

use thiserror::Error;

/// Broad classification of a collaborator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request reached the node but the DID could not be resolved.
    Resolution,
    /// The request never completed (connect failure, timeout, I/O).
    Transport,
    /// The node answered with something unexpected.
    Protocol,
}

/// Errors that can occur talking to the ledger node.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// DID is unknown to the node.
    #[error("DID not found: {0}")]
    NotFound(String),

    /// DID exists but has no confirmed version yet.
    #[error("DID not confirmed: {0}")]
    Unconfirmed(String),

    /// DID is syntactically invalid.
    #[error("Invalid DID: {0}")]
    InvalidDid(String),

    /// Connection or I/O failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Node answered with a non-success status.
    #[error("Ledger node rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::Unconfirmed(_) | Self::InvalidDid(_) => ErrorKind::Resolution,
            Self::Transport(_) | Self::Timeout(_) => ErrorKind::Transport,
            Self::Rejected { .. } | Self::Decode(_) => ErrorKind::Protocol,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    pub fn is_resolution(&self) -> bool {
        self.kind() == ErrorKind::Resolution
    }
}

/// Errors that can occur talking to the asset store (wallet layer).
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    /// No asset with this identifier.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Connection or I/O failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Store answered with a non-success status.
    #[error("Asset store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl AssetError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

//! # Gatekeeper Admin Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # In-memory ledger node, asset store, clock
//! │
//! └── integration/      # Cross-subsystem flows
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p gk-tests
//! cargo test -p gk-tests integration::
//! ```

pub mod fixtures;
pub mod integration;

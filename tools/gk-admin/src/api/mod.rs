//! HTTP adapters for the ledger node (gatekeeper) and the wallet service
//! (keymaster).
//!
//! Both speak plain JSON over REST under `/api/v1`.

mod client;
mod keymaster;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::GatekeeperClient;
pub use keymaster::KeymasterClient;
pub use types::*;

//! Ports module for Registry Queue

pub mod inbound;
pub mod outbound;

pub use inbound::RegistryQueueApi;
pub use outbound::{AssetStore, QueueStore};

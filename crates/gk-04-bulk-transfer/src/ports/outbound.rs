//! Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{DidQuery, ExportBundle, LedgerError};

/// Ledger node listing and export endpoints
#[async_trait]
pub trait LedgerExporter: Send + Sync {
    async fn list_dids(&self, query: &DidQuery) -> Result<Vec<String>, LedgerError>;

    /// One Event history per requested DID, in request order.
    async fn export_dids(&self, dids: &[String]) -> Result<ExportBundle, LedgerError>;
}

/// Time source for enqueue stamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

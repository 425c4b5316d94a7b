//! Bulk Transfer Service
//!
//! Main service implementing BulkTransferApi.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SecondsFormat;
use gk_01_batch_ordering::{fingerprint_ordered, order_events, signing_time, Fingerprint};
use gk_02_batch_import::BatchImportApi;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{DidHistory, DidQuery, Event, ImportResult, Ordinal};
use tracing::{debug, info, warn};

use crate::config::TransferConfig;
use crate::domain::entities::{BatchFile, ReplayItem};
use crate::domain::errors::TransferError;
use crate::ports::inbound::BulkTransferApi;
use crate::ports::outbound::{Clock, LedgerExporter, SystemClock};

/// Bulk Transfer Service
///
/// Imports go through the batch import API so chunking, timeouts and
/// failure reporting behave the same as any other import.
pub struct BulkTransferService {
    exporter: Arc<dyn LedgerExporter>,
    importer: Arc<dyn BatchImportApi>,
    clock: Arc<dyn Clock>,
    config: TransferConfig,
}

impl BulkTransferService {
    pub fn new(exporter: Arc<dyn LedgerExporter>, importer: Arc<dyn BatchImportApi>) -> Self {
        Self {
            exporter,
            importer,
            clock: Arc::new(SystemClock),
            config: TransferConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TransferConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Rewrap recorded items as fresh Events, keeping recorded order.
    pub fn replay_events(
        &self,
        payload: &Value,
        registry: Option<&str>,
    ) -> Result<Vec<Event>, TransferError> {
        let items = Vec::<ReplayItem>::deserialize(payload)
            .map_err(|e| TransferError::MalformedPayload(e.to_string()))?;

        let now = self.clock.now();
        let time = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let registry = registry.unwrap_or(&self.config.default_registry);

        Ok(items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                Event::new(
                    registry,
                    time.clone(),
                    Ordinal::Pair(millis, i as u64),
                    item.into_operation(),
                )
            })
            .collect())
    }
}

#[async_trait]
impl BulkTransferApi for BulkTransferService {
    async fn export_all(&self) -> Result<Vec<DidHistory>, TransferError> {
        let dids = self.exporter.list_dids(&DidQuery::new()).await?;
        if dids.is_empty() {
            return Ok(Vec::new());
        }

        let bundle = self.exporter.export_dids(&dids).await?;
        if bundle.len() != dids.len() {
            return Err(TransferError::ExportMismatch {
                requested: dids.len(),
                returned: bundle.len(),
            });
        }

        let mut keyed = dids
            .into_iter()
            .zip(bundle)
            .map(|(did, events)| {
                match events.first().map(|e| signing_time(e, 0)).transpose() {
                    Ok(first) => Ok((first, DidHistory { did, events })),
                    Err(source) => Err(TransferError::History { did, source }),
                }
            })
            .collect::<Result<Vec<_>, TransferError>>()?;

        keyed.sort_by_key(|(first, _)| (first.is_none(), *first));
        info!(dids = keyed.len(), "Exported DIDs");

        Ok(keyed.into_iter().map(|(_, history)| history).collect())
    }

    async fn import_file(&self, file: BatchFile) -> Result<ImportResult, TransferError> {
        let events = order_events(file.flatten())?;
        info!(events = events.len(), "Importing batch file");

        let result = self.importer.import_configured(&events).await?.total;
        report_outcome(&result, "Batch file imported");
        Ok(result)
    }

    fn hash_file(&self, file: BatchFile) -> Result<Fingerprint, TransferError> {
        let events = file.flatten();
        debug!(events = events.len(), "Hashing batch file");
        Ok(fingerprint_ordered(&events)?)
    }

    async fn import_replay(
        &self,
        payload: &Value,
        registry: Option<&str>,
    ) -> Result<ImportResult, TransferError> {
        let events = self.replay_events(payload, registry)?;
        info!(
            events = events.len(),
            registry = registry.unwrap_or(&self.config.default_registry),
            "Replaying recorded batch"
        );

        let result = self.importer.import_configured(&events).await?.total;
        report_outcome(&result, "Recorded batch replayed");
        Ok(result)
    }
}

fn report_outcome(result: &ImportResult, message: &str) {
    if result.fully_rejected() {
        warn!(%result, "{message}: every event rejected by the ledger node");
    } else {
        info!(%result, "{message}");
    }
}

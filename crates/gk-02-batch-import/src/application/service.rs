//! Import Orchestrator
//!
//! Main service implementing BatchImportApi.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use gk_01_batch_ordering::{chunk, ChunkSize};
use shared_types::{Event, ImportResult, LedgerError};
use tracing::{debug, info, warn};

use crate::config::ImportConfig;
use crate::domain::entities::{ChunkReport, ImportReport};
use crate::domain::errors::ImportError;
use crate::ports::inbound::BatchImportApi;
use crate::ports::outbound::BatchImporter;

/// Import Orchestrator
///
/// Orchestrates the import pipeline:
/// 1. Validate chunk size
/// 2. Split the ordered sequence into chunks
/// 3. Submit chunks in waves of at most `max_concurrent_chunks`
/// 4. Accumulate counters; stop scheduling after a transport failure
///
/// Holds no state between calls.
pub struct ImportOrchestrator {
    importer: Arc<dyn BatchImporter>,
    config: ImportConfig,
}

impl ImportOrchestrator {
    /// Create an orchestrator with default config
    pub fn new(importer: Arc<dyn BatchImporter>) -> Self {
        Self::with_config(importer, ImportConfig::default())
    }

    /// Create an orchestrator with custom config
    pub fn with_config(importer: Arc<dyn BatchImporter>, config: ImportConfig) -> Self {
        Self { importer, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Submit one chunk, applying the configured timeout.
    async fn submit(&self, index: usize, events: &[Event]) -> Result<ChunkReport, LedgerError> {
        let started = Instant::now();
        let call = self.importer.import_batch(events);

        let result = match self.config.chunk_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| LedgerError::Timeout(limit))??,
            None => call.await?,
        };

        let elapsed = started.elapsed();
        info!(
            chunk = index,
            events = events.len(),
            verified = result.verified,
            updated = result.updated,
            failed = result.failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "Imported chunk"
        );

        Ok(ChunkReport {
            index,
            events: events.len(),
            result,
            elapsed,
        })
    }
}

#[async_trait]
impl BatchImportApi for ImportOrchestrator {
    async fn import_batch(&self, events: &[Event]) -> Result<ImportResult, ImportError> {
        if events.is_empty() {
            debug!("Empty batch, ledger node not contacted");
            return Ok(ImportResult::default());
        }

        self.submit(0, events)
            .await
            .map(|report| report.result)
            .map_err(|source| ImportError::ChunksFailed {
                imported: ImportResult::default(),
                failed_chunks: vec![0],
                total_chunks: 1,
                source,
            })
    }

    async fn import_configured(&self, events: &[Event]) -> Result<ImportReport, ImportError> {
        self.import_with_report(events, self.config.chunk_size).await
    }

    async fn import_with_report(
        &self,
        events: &[Event],
        chunk_size: usize,
    ) -> Result<ImportReport, ImportError> {
        let size = ChunkSize::new(chunk_size).map_err(|_| ImportError::InvalidChunkSize)?;
        let chunks: Vec<(usize, &[Event])> = chunk(events, size).into_iter().enumerate().collect();
        let total_chunks = chunks.len();

        if total_chunks == 0 {
            debug!("Empty batch, ledger node not contacted");
            return Ok(ImportReport::default());
        }

        info!(
            events = events.len(),
            chunks = total_chunks,
            chunk_size,
            concurrency = self.config.concurrency(),
            "Starting chunked import"
        );

        let mut completed = Vec::with_capacity(total_chunks);
        let mut first_error: Option<LedgerError> = None;

        for wave in chunks.chunks(self.config.concurrency()) {
            let outcomes = join_all(
                wave.iter()
                    .map(|&(index, events)| async move { (index, self.submit(index, events).await) }),
            )
            .await;

            for (index, outcome) in outcomes {
                match outcome {
                    Ok(report) => completed.push(report),
                    Err(e) => {
                        warn!(chunk = index, error = %e, "Chunk submission failed");
                        first_error.get_or_insert(e);
                    }
                }
            }

            if first_error.is_some() {
                break;
            }
        }

        let report = ImportReport::from_chunks(completed);

        if let Some(source) = first_error {
            let failed_chunks: Vec<usize> = (0..total_chunks)
                .filter(|i| !report.chunks.iter().any(|c| c.index == *i))
                .collect();
            warn!(
                imported = %report.total,
                remaining = failed_chunks.len(),
                "Chunked import stopped"
            );
            return Err(ImportError::ChunksFailed {
                imported: report.total,
                failed_chunks,
                total_chunks,
                source,
            });
        }

        info!(
            verified = report.total.verified,
            updated = report.total.updated,
            failed = report.total.failed,
            "Chunked import complete"
        );

        Ok(report)
    }
}

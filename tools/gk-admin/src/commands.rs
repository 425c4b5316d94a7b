//! Admin commands and their wiring onto the subsystem services.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use gk_02_batch_import::ImportOrchestrator;
use gk_03_registry_queue::{AssetStore, BatchId, RegistryQueueApi, RegistryQueueManager};
use gk_04_bulk_transfer::{BatchFile, BulkTransferApi, BulkTransferService};
use serde::Serialize;
use shared_types::{DidQuery, ExportBundle, ResolveOptions};

use crate::api::{GatekeeperClient, KeymasterClient};
use crate::config::AdminConfig;

/// Admin subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Return the document associated with a DID
    ResolveDid {
        did: String,
        /// Resolve the latest confirmed version only
        #[arg(long)]
        confirm: bool,
        /// Resolve as of this instant (RFC 3339)
        #[arg(long)]
        at_time: Option<DateTime<Utc>>,
        /// Resolve this document version
        #[arg(long)]
        at_version: Option<u32>,
    },

    /// List DIDs, optionally within an update window
    GetDids {
        #[arg(long)]
        updated_after: Option<DateTime<Utc>>,
        #[arg(long)]
        updated_before: Option<DateTime<Utc>>,
        #[arg(long)]
        confirm: Option<bool>,
        /// Return documents instead of identifiers
        #[arg(long)]
        resolve: Option<bool>,
    },

    /// Export every DID with its event history
    ExportDids,

    /// Import a batch file in chunks, ordered by signing time
    ImportDids { file: PathBuf },

    /// Print the order-independent hash of a batch file
    HashDids { file: PathBuf },

    /// Show the pending queue of a registry
    ShowQueue { registry: String },

    /// Snapshot a registry queue into a batch asset
    CreateBatch { registry: String },

    /// Remove the events of a batch from a registry queue
    ///
    /// Batches older than the latest one are refused only when both were
    /// created by the same process; across invocations pass the batch
    /// printed by the most recent create-batch.
    ClearQueue { registry: String, batch: String },

    /// Replay a batch recorded under a DID into a registry
    ImportBatch {
        did: String,
        /// Target registry (default: local)
        registry: Option<String>,
    },

    /// Show whether a registry queue is empty, pending or snapshotted
    ///
    /// Snapshots are not remembered between invocations: without --batch
    /// the queue is reported as empty or pending only.
    QueueState {
        registry: String,
        /// Batch (from create-batch) to compare the queue against
        #[arg(long)]
        batch: Option<String>,
    },

    /// List registries supported by the ledger node
    ListRegistries,

    /// Reset the ledger database to empty
    ResetDb,
}

impl Command {
    /// Whether the command talks to the ledger node.
    pub fn needs_node(&self) -> bool {
        !matches!(self, Self::HashDids { .. })
    }
}

/// Services behind the admin commands.
pub struct Admin {
    gatekeeper: Arc<GatekeeperClient>,
    keymaster: Arc<KeymasterClient>,
    queue: RegistryQueueManager,
    transfer: BulkTransferService,
    config: AdminConfig,
}

impl Admin {
    pub fn new(config: AdminConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let gatekeeper = Arc::new(GatekeeperClient::new(
            &config.gatekeeper_url,
            config.request_timeout,
        )?);
        let keymaster = Arc::new(KeymasterClient::new(
            &config.keymaster_url,
            config.request_timeout,
        )?);

        let importer = Arc::new(ImportOrchestrator::with_config(
            gatekeeper.clone(),
            config.import.clone(),
        ));
        let queue = RegistryQueueManager::new(gatekeeper.clone(), keymaster.clone());
        let transfer = BulkTransferService::new(gatekeeper.clone(), importer)
            .with_config(config.transfer.clone());

        Ok(Self {
            gatekeeper,
            keymaster,
            queue,
            transfer,
            config,
        })
    }

    pub async fn wait_until_ready(&self) -> anyhow::Result<()> {
        self.gatekeeper
            .wait_until_ready(self.config.ready_interval, self.config.ready_attempts)
            .await
            .context("Ledger node not ready")
    }

    /// Run one command, returning what to print on stdout.
    pub async fn execute(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::ResolveDid {
                did,
                confirm,
                at_time,
                at_version,
            } => {
                let options = ResolveOptions {
                    at_time,
                    at_version,
                    confirm: confirm.then_some(true),
                };
                let doc = self
                    .gatekeeper
                    .resolve_did(&did, &options)
                    .await
                    .with_context(|| format!("Cannot resolve {did}"))?;
                pretty(&doc)
            }

            Command::GetDids {
                updated_after,
                updated_before,
                confirm,
                resolve,
            } => {
                let query = DidQuery {
                    updated_after,
                    updated_before,
                    confirm,
                    resolve,
                };
                pretty(&self.gatekeeper.get_dids(&query).await?)
            }

            Command::ExportDids => {
                let bundle: ExportBundle = self
                    .transfer
                    .export_all()
                    .await?
                    .into_iter()
                    .map(|history| history.events)
                    .collect();
                pretty(&bundle)
            }

            Command::ImportDids { file } => {
                let batch = read_batch_file(&file).await?;
                let result = self
                    .transfer
                    .import_file(batch)
                    .await
                    .with_context(|| format!("Import of {} incomplete", file.display()))?;
                Ok(result.to_string())
            }

            Command::HashDids { file } => {
                let batch = read_batch_file(&file).await?;
                Ok(self.transfer.hash_file(batch)?.to_hex())
            }

            Command::ShowQueue { registry } => pretty(&self.queue.peek_queue(&registry).await?),

            Command::CreateBatch { registry } => {
                pretty(&self.queue.create_batch(&registry).await?)
            }

            Command::ClearQueue { registry, batch } => {
                let batch_id = BatchId::from(batch);
                if self.queue.clear_batch(&registry, &batch_id).await? {
                    Ok("Batch cleared".to_string())
                } else {
                    bail!("Batch {batch_id} not cleared: queue for {registry} changed, re-run show-queue")
                }
            }

            Command::ImportBatch { did, registry } => {
                let payload = self
                    .keymaster
                    .resolve_asset(&did)
                    .await
                    .with_context(|| format!("Cannot resolve batch {did}"))?;
                let result = self
                    .transfer
                    .import_replay(&payload, registry.as_deref())
                    .await?;
                Ok(result.to_string())
            }

            Command::QueueState { registry, batch } => {
                let batch_id = batch.map(BatchId::from);
                pretty(&self.queue.queue_state(&registry, batch_id.as_ref()).await?)
            }

            Command::ListRegistries => pretty(&self.gatekeeper.list_registries().await?),

            Command::ResetDb => pretty(&self.gatekeeper.reset_db().await?),
        }
    }
}

fn pretty<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn read_batch_file(path: &Path) -> anyhow::Result<BatchFile> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a batch file", path.display()))
}

//! Ledger node client for the gatekeeper REST API.

use std::time::Duration;

use async_trait::async_trait;
use gk_02_batch_import::BatchImporter;
use gk_03_registry_queue::QueueStore;
use gk_04_bulk_transfer::LedgerExporter;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{
    DidQuery, Event, ExportBundle, ImportResult, LedgerError, Operation, OperationKind,
    ResolveOptions,
};
use tracing::{debug, info};

/// Ledger node client.
///
/// Implements the ledger-facing outbound ports of the import, queue and
/// transfer subsystems.
pub struct GatekeeperClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

/// DID a request is about, and whether confirmation was requested.
type DidSubject<'a> = Option<(&'a str, bool)>;

impl GatekeeperClient {
    /// Create a new ledger node client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> LedgerError {
        if e.is_timeout() {
            LedgerError::Timeout(self.timeout)
        } else if e.is_decode() {
            LedgerError::Decode(e.to_string())
        } else if e.is_connect() {
            LedgerError::Transport(format!("Cannot connect to {}", self.base_url))
        } else {
            LedgerError::Transport(e.to_string())
        }
    }

    /// Send a request and map non-success statuses.
    async fn send(&self, request: RequestBuilder, did: DidSubject<'_>) -> Result<Response, LedgerError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(match (status, did) {
            (StatusCode::NOT_FOUND, Some((did, true))) => LedgerError::Unconfirmed(did.to_string()),
            (StatusCode::NOT_FOUND, Some((did, false))) => LedgerError::NotFound(did.to_string()),
            (StatusCode::BAD_REQUEST, Some((did, _))) => LedgerError::InvalidDid(did.to_string()),
            _ => LedgerError::Rejected {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, LedgerError> {
        response.json().await.map_err(|e| self.transport_error(e))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, LedgerError> {
        let response = self.send(self.client.get(self.url(path)), None).await?;
        self.decode(response).await
    }

    /// Check if the ledger node is accepting requests.
    pub async fn is_ready(&self) -> bool {
        match self.client.get(self.url("ready")).send().await {
            Ok(response) if response.status().is_success() => {
                response.json::<bool>().await.unwrap_or(false)
            }
            _ => false,
        }
    }

    /// Poll the readiness probe every `interval`.
    ///
    /// Gives up after `max_attempts` probes when set; waits forever
    /// otherwise.
    pub async fn wait_until_ready(
        &self,
        interval: Duration,
        max_attempts: Option<u32>,
    ) -> Result<(), LedgerError> {
        info!(url = %self.base_url, "Connecting to ledger node");
        let mut attempts = 0u32;

        loop {
            if self.is_ready().await {
                info!(url = %self.base_url, "Ledger node ready");
                return Ok(());
            }

            attempts += 1;
            if max_attempts.is_some_and(|max| attempts >= max) {
                return Err(LedgerError::Transport(format!(
                    "{} not ready after {} attempts",
                    self.base_url, attempts
                )));
            }

            debug!(attempts, "Waiting for ledger node");
            tokio::time::sleep(interval).await;
        }
    }

    pub async fn get_version(&self) -> Result<Value, LedgerError> {
        self.get("version").await
    }

    pub async fn list_registries(&self) -> Result<Vec<String>, LedgerError> {
        self.get("registries").await
    }

    /// Drop every DID and queue on the node.
    pub async fn reset_db(&self) -> Result<Value, LedgerError> {
        info!(url = %self.base_url, "Resetting ledger database");
        self.get("reset-db").await
    }

    /// Resolve a DID document.
    pub async fn resolve_did(&self, did: &str, options: &ResolveOptions) -> Result<Value, LedgerError> {
        let request = self
            .client
            .get(self.url(&format!("did/{did}")))
            .query(&options.query_pairs());
        let response = self
            .send(request, Some((did, options.confirm.unwrap_or(false))))
            .await?;
        self.decode(response).await
    }

    /// List DIDs, or their documents when `query.resolve` is set.
    pub async fn get_dids(&self, query: &DidQuery) -> Result<Vec<Value>, LedgerError> {
        let request = self.client.post(self.url("dids/")).json(query);
        let response = self.send(request, None).await?;
        self.decode(response).await
    }

    /// Submit a signed operation; the node queues the resulting Event.
    ///
    /// Create goes to `POST did/`, update to `POST did/{did}` and delete
    /// to `DELETE did/{did}`. Update and delete must name their DID.
    pub async fn submit_operation(&self, operation: &Operation) -> Result<Value, LedgerError> {
        let request = match &operation.kind {
            OperationKind::Update | OperationKind::Delete => {
                let did = operation.did().ok_or_else(|| {
                    LedgerError::InvalidDid(format!("{} operation without did", operation.kind))
                })?;
                let url = self.url(&format!("did/{did}"));
                let request = if operation.kind == OperationKind::Delete {
                    self.client.delete(url)
                } else {
                    self.client.post(url)
                };
                request.json(operation)
            }
            _ => self.client.post(self.url("did/")).json(operation),
        };

        let response = self.send(request, operation.did().map(|did| (did, false))).await?;
        self.decode(response).await
    }
}

#[async_trait]
impl BatchImporter for GatekeeperClient {
    async fn import_batch(&self, events: &[Event]) -> Result<ImportResult, LedgerError> {
        let request = self.client.post(self.url("import-batch/")).json(events);
        let response = self.send(request, None).await?;
        let result: ImportResult = self.decode(response).await?;
        debug!(events = events.len(), %result, "Ledger node import");
        Ok(result)
    }
}

#[async_trait]
impl QueueStore for GatekeeperClient {
    async fn enqueue(&self, event: &Event) -> Result<(), LedgerError> {
        self.submit_operation(&event.operation).await.map(|_| ())
    }

    async fn get_queue(&self, registry: &str) -> Result<Vec<Event>, LedgerError> {
        self.get(&format!("queue/{registry}")).await
    }

    async fn clear_queue(&self, registry: &str, events: &[Event]) -> Result<bool, LedgerError> {
        let request = self
            .client
            .post(self.url(&format!("queue/{registry}/clear")))
            .json(events);
        let response = self.send(request, None).await?;
        self.decode(response).await
    }
}

#[async_trait]
impl LedgerExporter for GatekeeperClient {
    async fn list_dids(&self, query: &DidQuery) -> Result<Vec<String>, LedgerError> {
        self.get_dids(query)
            .await?
            .into_iter()
            .map(|value| {
                value
                    .as_str()
                    .or_else(|| value.pointer("/didDocument/id").and_then(Value::as_str))
                    .map(str::to_string)
                    .ok_or_else(|| LedgerError::Decode(format!("Not a DID: {value}")))
            })
            .collect()
    }

    async fn export_dids(&self, dids: &[String]) -> Result<ExportBundle, LedgerError> {
        let request = self.client.post(self.url("export-dids")).json(dids);
        let response = self.send(request, None).await?;
        self.decode(response).await
    }
}

//! Wallet service client, used as the batch asset store.

use std::time::Duration;

use async_trait::async_trait;
use gk_03_registry_queue::AssetStore;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::AssetError;
use tracing::debug;

use super::types::{CreateAssetRequest, CreateAssetResponse, ResolveAssetResponse};

/// Keymaster client.
pub struct KeymasterClient {
    client: Client,
    base_url: String,
}

impl KeymasterClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AssetError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssetError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        result: reqwest::Result<Response>,
        subject: &str,
    ) -> Result<T, AssetError> {
        let response = result.map_err(|e| {
            if e.is_connect() {
                AssetError::Transport(format!("Cannot connect to {}", self.base_url))
            } else {
                AssetError::Transport(e.to_string())
            }
        })?;

        match response.status() {
            status if status.is_success() => response
                .json()
                .await
                .map_err(|e| AssetError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(AssetError::NotFound(subject.to_string())),
            status => Err(AssetError::Rejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl AssetStore for KeymasterClient {
    async fn create_asset(&self, data: &Value) -> Result<String, AssetError> {
        let result = self
            .client
            .post(self.url("assets"))
            .json(&CreateAssetRequest { data })
            .send()
            .await;
        let created: CreateAssetResponse = self.decode(result, "new asset").await?;
        debug!(asset = %created.did, "Created asset");
        Ok(created.did)
    }

    async fn resolve_asset(&self, id: &str) -> Result<Value, AssetError> {
        let result = self
            .client
            .get(self.url(&format!("assets/{id}")))
            .send()
            .await;
        let resolved: ResolveAssetResponse = self.decode(result, id).await?;
        Ok(resolved.asset)
    }
}

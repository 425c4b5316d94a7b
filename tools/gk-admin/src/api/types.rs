//! Request and response bodies that have no counterpart in shared-types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/v1/assets`
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssetRequest<'a> {
    pub data: &'a Value,
}

/// Response of `POST /api/v1/assets`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssetResponse {
    pub did: String,
}

/// Response of `GET /api/v1/assets/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveAssetResponse {
    pub asset: Value,
}

//! In-process ledger node and wallet service for adapter tests.
//!
//! Serves both REST surfaces from one axum router. Registry `broken`
//! answers 500 and registry `slow` stalls for two seconds.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared_types::Event;

#[derive(Default)]
pub(crate) struct NodeState {
    queues: Mutex<HashMap<String, Vec<Value>>>,
    assets: Mutex<HashMap<String, Value>>,
    imported: Mutex<Vec<Value>>,
    submissions: Mutex<Vec<String>>,
}

impl NodeState {
    pub(crate) fn seed(&self, registry: &str, event: &Event) {
        let value = serde_json::to_value(event).unwrap();
        self.queues
            .lock()
            .entry(registry.to_string())
            .or_default()
            .push(value);
    }

    pub(crate) fn queue(&self, registry: &str) -> Vec<Event> {
        let queues = self.queues.lock();
        let values = queues.get(registry).cloned().unwrap_or_default();
        serde_json::from_value(Value::Array(values)).unwrap()
    }

    pub(crate) fn imported(&self) -> Vec<Value> {
        self.imported.lock().clone()
    }

    pub(crate) fn submissions(&self) -> Vec<String> {
        self.submissions.lock().clone()
    }

    pub(crate) fn asset_count(&self) -> usize {
        self.assets.lock().len()
    }

    fn enqueue_operation(&self, route: String, operation: Value) {
        self.submissions.lock().push(route);
        let registry = operation
            .pointer("/mdip/registry")
            .and_then(Value::as_str)
            .unwrap_or("local")
            .to_string();
        let time = operation
            .pointer("/signature/signed")
            .cloned()
            .unwrap_or_else(|| json!("2024-01-01T00:00:00Z"));

        let mut queues = self.queues.lock();
        let queue = queues.entry(registry.clone()).or_default();
        let seq = queue.len();
        queue.push(json!({
            "registry": registry,
            "time": time,
            "ordinal": [0, seq],
            "operation": operation,
        }));
    }
}

type Shared = State<Arc<NodeState>>;

pub(crate) fn router(state: Arc<NodeState>) -> Router {
    Router::new()
        .route("/api/v1/ready", get(|| async { Json(true) }))
        .route("/api/v1/version", get(|| async { Json(1) }))
        .route(
            "/api/v1/registries",
            get(|| async { Json(vec!["local", "hyperswarm"]) }),
        )
        .route("/api/v1/reset-db", get(reset_db))
        .route("/api/v1/did/", post(create_did))
        .route(
            "/api/v1/did/:did",
            get(resolve_did).post(update_did).delete(delete_did),
        )
        .route("/api/v1/dids/", post(get_dids))
        .route("/api/v1/export-dids", post(export_dids))
        .route("/api/v1/import-batch/", post(import_batch))
        .route("/api/v1/queue/:registry", get(get_queue))
        .route("/api/v1/queue/:registry/clear", post(clear_queue))
        .route("/api/v1/assets", post(create_asset))
        .route("/api/v1/assets/:id", get(resolve_asset))
        .with_state(state)
}

/// Serve the router on an ephemeral port, returning its base URL.
pub(crate) async fn spawn() -> (String, Arc<NodeState>) {
    let state = Arc::new(NodeState::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (format!("http://{addr}"), state)
}

async fn reset_db(State(state): Shared) -> Json<bool> {
    state.queues.lock().clear();
    state.imported.lock().clear();
    Json(true)
}

async fn resolve_did(
    Path(did): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if did == "not-a-did" {
        return (StatusCode::BAD_REQUEST, "Invalid DID").into_response();
    }
    if did.starts_with("did:test:missing") {
        return (StatusCode::NOT_FOUND, "Unknown DID").into_response();
    }
    Json(json!({ "didDocument": { "id": did }, "query": query })).into_response()
}

async fn create_did(State(state): Shared, Json(operation): Json<Value>) -> Json<Value> {
    state.enqueue_operation("POST did/".to_string(), operation);
    Json(json!("did:test:created"))
}

async fn update_did(
    State(state): Shared,
    Path(did): Path<String>,
    Json(operation): Json<Value>,
) -> Json<bool> {
    state.enqueue_operation(format!("POST did/{did}"), operation);
    Json(true)
}

async fn delete_did(
    State(state): Shared,
    Path(did): Path<String>,
    Json(operation): Json<Value>,
) -> Json<bool> {
    state.enqueue_operation(format!("DELETE did/{did}"), operation);
    Json(true)
}

async fn get_dids(Json(query): Json<Value>) -> Json<Value> {
    if query["resolve"] == json!(true) {
        Json(json!([
            { "didDocument": { "id": "did:test:a" } },
            { "didDocument": { "id": "did:test:b" } },
        ]))
    } else {
        Json(json!(["did:test:a", "did:test:b"]))
    }
}

async fn export_dids(Json(dids): Json<Vec<String>>) -> Json<Value> {
    let bundle: Vec<Value> = dids
        .iter()
        .enumerate()
        .map(|(i, did)| {
            let signed = format!("2024-01-0{}T00:00:00Z", i + 1);
            json!([{
                "registry": "hyperswarm",
                "time": signed,
                "ordinal": [i, 0],
                "operation": {
                    "type": "create",
                    "did": did,
                    "signature": { "signed": signed, "hash": did, "value": "sig" }
                }
            }])
        })
        .collect();
    Json(Value::Array(bundle))
}

async fn import_batch(State(state): Shared, Json(events): Json<Vec<Value>>) -> Json<Value> {
    let (mut verified, mut updated, mut failed) = (0, 0, 0);
    for event in &events {
        match event["operation"]["type"].as_str() {
            Some("create") => verified += 1,
            Some("update") => updated += 1,
            _ => failed += 1,
        }
    }
    state.imported.lock().extend(events);
    Json(json!({ "verified": verified, "updated": updated, "failed": failed, "queued": 0 }))
}

async fn get_queue(State(state): Shared, Path(registry): Path<String>) -> Response {
    match registry.as_str() {
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!([])).into_response()
        }
        _ => {
            let queue = state.queues.lock().get(&registry).cloned().unwrap_or_default();
            Json(queue).into_response()
        }
    }
}

async fn clear_queue(
    State(state): Shared,
    Path(registry): Path<String>,
    Json(events): Json<Vec<Value>>,
) -> Json<bool> {
    if let Some(queue) = state.queues.lock().get_mut(&registry) {
        queue.retain(|e| !events.contains(e));
    }
    Json(true)
}

async fn create_asset(State(state): Shared, Json(body): Json<Value>) -> Json<Value> {
    let mut assets = state.assets.lock();
    let id = format!("did:test:asset{}", assets.len() + 1);
    assets.insert(id.clone(), body["data"].clone());
    Json(json!({ "did": id }))
}

async fn resolve_asset(State(state): Shared, Path(id): Path<String>) -> Response {
    match state.assets.lock().get(&id) {
        Some(asset) => Json(json!({ "asset": asset })).into_response(),
        None => (StatusCode::NOT_FOUND, "Unknown asset").into_response(),
    }
}

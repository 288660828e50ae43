//! Health Handler

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::infrastructure::driving_adapters::api_rest::AppState;

/// Create the router for the health endpoint
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

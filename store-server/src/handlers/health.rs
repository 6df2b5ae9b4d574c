use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::StoreServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub kind: String,
    pub version: String,
    pub timestamp: String,
}

pub async fn health_check(State(server): State<StoreServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        kind: server.kind.as_str().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

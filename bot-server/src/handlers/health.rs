use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::BotServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub services: Vec<String>,
}

/// Liveness only; the stores and the backend are not checked
pub async fn health_check(State(server): State<BotServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        services: server.catalog.names().to_vec(),
    })
}

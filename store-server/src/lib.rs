//! ConfigBot store server
//!
//! Serves one JSON document per service over `GET /{name}`. The same binary
//! runs as the schema store (`*.schema.json`) or the values store
//! (`*.value.json`); documents are read from disk on every request.
//!
//! The health check lives at `GET /-/health`, two segments deep, so every
//! single-segment path belongs to the document namespace.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ApiErrorResponse};
pub use server::{StoreKind, StoreServer};

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers::{documents, health};

pub const HEALTH_PATH: &str = "/-/health";

/// Create the store router
pub fn create_app(server: StoreServer) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health::health_check))
        .route("/:name", get(documents::get_document))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(server)
}

//! ConfigBot server - natural-language configuration updates
//!
//! A request such as `"set tournament service memory to 1024mb"` is classified
//! to a service, the service's schema and current values are fetched, an
//! inference backend proposes the updated configuration, and the proposal is
//! validated against the schema before it is returned. Nothing is written
//! back to the stores.

pub mod clients;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod routes;
pub mod server;
pub mod settings;

// Re-export commonly used types
pub use error::{ApiError, ApiErrorResponse};
pub use server::BotServer;
pub use settings::BotSettings;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes and middleware
pub fn create_app(server: BotServer) -> Router {
    routes::create_routes()
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(server)
}

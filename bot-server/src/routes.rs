use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, message},
    server::BotServer,
};

/// Create health check routes
pub fn health_routes() -> Router<BotServer> {
    Router::new().route("/health", get(health::health_check))
}

/// Create the update endpoint
pub fn message_routes() -> Router<BotServer> {
    Router::new().route("/message", post(message::update_message))
}

/// All routes of the bot server
pub fn create_routes() -> Router<BotServer> {
    Router::new().merge(health_routes()).merge(message_routes())
}

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::server::StoreServer;

/// `GET /{name}`: the stored document, verbatim
pub async fn get_document(
    State(server): State<StoreServer>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let document = server.store.load(&name).await?;
    debug!(kind = server.kind.as_str(), name = %name, "Served document");
    Ok(Json(document))
}

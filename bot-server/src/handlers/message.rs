use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::pipeline::{UpdateOutcome, UpdateRequest};
use crate::server::BotServer;

/// `POST /message`: turn one instruction into a validated configuration
pub async fn update_message(
    State(server): State<BotServer>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text(), &request_id))?;

    let span = info_span!("update_request", request_id = %request_id);
    server
        .orchestrator
        .handle(&request)
        .instrument(span)
        .await
        .map(Json)
        .map_err(|e| ApiError::pipeline(e, &request_id))
}

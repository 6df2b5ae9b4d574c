use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use config_engine::ConfigError;
use error_common::codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Error body for every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error_id: String,
    pub error_type: String,
    pub error_code: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No document named '{name}'")]
    NotFound { name: String },

    #[error("Document could not be loaded: {message}")]
    Internal { message: String },
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::SourceNotFound(name) => ApiError::NotFound { name },
            other => ApiError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => codes::request::NOT_FOUND,
            ApiError::Internal { .. } => codes::request::INTERNAL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        match &self {
            ApiError::NotFound { .. } => warn!(
                error_id = %error_id,
                error_code = self.error_code(),
                error = %self,
                "Document lookup missed"
            ),
            ApiError::Internal { .. } => error!(
                error_id = %error_id,
                error_code = self.error_code(),
                error = %self,
                "Document lookup failed"
            ),
        }

        let body = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            error_code: self.error_code().to_string(),
            message: self.to_string(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use config_engine::Violation;
use error_common::{codes, ErrorContext, Stage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::pipeline::{ClassificationError, PipelineError, ValidationError};

/// Error body for every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Unique error ID for tracking
    pub error_id: String,
    pub error_type: String,
    pub error_code: String,
    pub stage: Stage,
    pub message: String,
    /// Violated schema constraints, validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{error}")]
    Pipeline {
        error: PipelineError,
        context: ErrorContext,
    },

    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        context: ErrorContext,
    },
}

impl ApiError {
    pub fn pipeline(error: PipelineError, request_id: &str) -> Self {
        let context = ErrorContext::new()
            .with_request_id(request_id.to_string())
            .with_stage(error.stage());
        Self::Pipeline { error, context }
    }

    pub fn bad_request(message: impl Into<String>, request_id: &str) -> Self {
        Self::BadRequest {
            message: message.into(),
            context: ErrorContext::new()
                .with_request_id(request_id.to_string())
                .with_stage(Stage::Request),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Pipeline { error, .. } => match error {
                PipelineError::Classification(ClassificationError::Unrecognized(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PipelineError::Classification(_) => StatusCode::BAD_GATEWAY,
                PipelineError::SchemaNotFound(_) | PipelineError::ValuesNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                PipelineError::SchemaFetch { .. }
                | PipelineError::ValuesFetch { .. }
                | PipelineError::Inference(_) => StatusCode::BAD_GATEWAY,
                PipelineError::MalformedOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
                PipelineError::Validation(ValidationError::Violations(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PipelineError::Validation(ValidationError::InvalidSchema(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Pipeline { error, .. } => error.error_type(),
            ApiError::BadRequest { .. } => "bad_request",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Pipeline { error, .. } => error.code(),
            ApiError::BadRequest { .. } => codes::request::BAD_REQUEST,
        }
    }

    fn context(&self) -> &ErrorContext {
        match self {
            ApiError::Pipeline { context, .. } | ApiError::BadRequest { context, .. } => context,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();
        let context = self.context();

        // Pipeline failures were already logged by the orchestrator
        if let ApiError::BadRequest { .. } = &self {
            warn!(
                error_id = %error_id,
                request_id = context.request_id.as_deref().unwrap_or("-"),
                error_code = self.error_code(),
                error = %self,
                "Rejected malformed request"
            );
        }

        let violations = match &self {
            ApiError::Pipeline { error, .. } => error.violations().map(<[Violation]>::to_vec),
            ApiError::BadRequest { .. } => None,
        };

        let body = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            error_code: self.error_code().to_string(),
            stage: context.stage.unwrap_or(Stage::Request),
            message: self.to_string(),
            violations,
            timestamp: chrono::Utc::now(),
            request_id: context.request_id.clone(),
        };

        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: PipelineError) -> StatusCode {
        ApiError::pipeline(error, "req").status_code()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status(PipelineError::Classification(ClassificationError::Empty)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(PipelineError::Classification(ClassificationError::Unrecognized("raid".into()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status(PipelineError::SchemaNotFound("raid".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(PipelineError::ValuesNotFound("raid".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(PipelineError::SchemaFetch {
                service: "chat".into(),
                message: "refused".into()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status(PipelineError::Inference("timeout".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status(PipelineError::MalformedOutput("eof".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(PipelineError::Validation(ValidationError::Violations(vec![]))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(PipelineError::Validation(ValidationError::InvalidSchema("bad".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_facing_errors_are_4xx() {
        let errors = vec![
            PipelineError::Classification(ClassificationError::Unrecognized("raid".into())),
            PipelineError::Classification(ClassificationError::Transport("refused".into())),
            PipelineError::SchemaNotFound("raid".into()),
            PipelineError::MalformedOutput("eof".into()),
            PipelineError::Validation(ValidationError::Violations(vec![])),
        ];
        for error in errors {
            let client_facing = error.is_client_facing();
            let status = status(error);
            assert_eq!(status.is_client_error(), client_facing, "status {}", status);
        }
    }

    #[test]
    fn test_bad_request_carries_request_stage() {
        let err = ApiError::bad_request("missing field `input`", "req-9");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), codes::request::BAD_REQUEST);
        assert_eq!(err.context().stage, Some(Stage::Request));
        assert_eq!(err.context().request_id.as_deref(), Some("req-9"));
    }
}

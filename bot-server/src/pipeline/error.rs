use config_engine::Violation;
use error_common::{codes, Stage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("inference call failed: {0}")]
    Transport(String),

    #[error("backend returned no service identifier")]
    Empty,

    #[error("'{0}' is not a known service")]
    Unrecognized(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{}", describe(.0))]
    Violations(Vec<Violation>),

    #[error("schema document is invalid: {0}")]
    InvalidSchema(String),
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every way an update request can fail, one variant per failure domain
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Classification failed: {0}")]
    Classification(ClassificationError),

    #[error("No schema for service '{0}'")]
    SchemaNotFound(String),

    #[error("Schema fetch failed for service '{service}': {message}")]
    SchemaFetch { service: String, message: String },

    #[error("No current values for service '{0}'")]
    ValuesNotFound(String),

    #[error("Values fetch failed for service '{service}': {message}")]
    ValuesFetch { service: String, message: String },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Generated output is not a JSON object: {0}")]
    MalformedOutput(String),

    #[error("Candidate configuration rejected: {0}")]
    Validation(ValidationError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Classification(_) => Stage::Classification,
            PipelineError::SchemaNotFound(_) | PipelineError::SchemaFetch { .. } => Stage::SchemaFetch,
            PipelineError::ValuesNotFound(_) | PipelineError::ValuesFetch { .. } => Stage::ValuesFetch,
            PipelineError::Inference(_) => Stage::Inference,
            PipelineError::MalformedOutput(_) => Stage::OutputParse,
            PipelineError::Validation(_) => Stage::Validation,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Classification(ClassificationError::Transport(_)) => {
                codes::classification::TRANSPORT
            }
            PipelineError::Classification(ClassificationError::Empty) => {
                codes::classification::EMPTY_RESPONSE
            }
            PipelineError::Classification(ClassificationError::Unrecognized(_)) => {
                codes::classification::UNRECOGNIZED
            }
            PipelineError::SchemaNotFound(_) => codes::schema::NOT_FOUND,
            PipelineError::SchemaFetch { .. } => codes::schema::FETCH_FAILED,
            PipelineError::ValuesNotFound(_) => codes::values::NOT_FOUND,
            PipelineError::ValuesFetch { .. } => codes::values::FETCH_FAILED,
            PipelineError::Inference(_) => codes::inference::FAILED,
            PipelineError::MalformedOutput(_) => codes::output::MALFORMED,
            PipelineError::Validation(ValidationError::Violations(_)) => {
                codes::validation::CONSTRAINT_VIOLATION
            }
            PipelineError::Validation(ValidationError::InvalidSchema(_)) => {
                codes::validation::INVALID_SCHEMA
            }
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            PipelineError::Classification(_) => "classification_error",
            PipelineError::SchemaNotFound(_) => "schema_not_found",
            PipelineError::SchemaFetch { .. } => "schema_fetch_error",
            PipelineError::ValuesNotFound(_) => "values_not_found",
            PipelineError::ValuesFetch { .. } => "values_fetch_error",
            PipelineError::Inference(_) => "inference_error",
            PipelineError::MalformedOutput(_) => "malformed_output",
            PipelineError::Validation(_) => "validation_error",
        }
    }

    /// True when the request itself cannot be satisfied, false for
    /// dependency or generation failures
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            PipelineError::Classification(ClassificationError::Unrecognized(_))
                | PipelineError::SchemaNotFound(_)
                | PipelineError::ValuesNotFound(_)
                | PipelineError::Validation(ValidationError::Violations(_))
        )
    }

    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            PipelineError::Validation(ValidationError::Violations(v)) => Some(v),
            _ => None,
        }
    }
}

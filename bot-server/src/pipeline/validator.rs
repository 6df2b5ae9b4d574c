use config_engine::{ConfigError, ConfigValidator};
use serde_json::Value;
use std::sync::Arc;

use crate::pipeline::error::{PipelineError, ValidationError};
use crate::pipeline::{ConfigObject, SchemaDocument};

/// Validation stage: hands the candidate back unchanged when it conforms
#[derive(Clone)]
pub struct CandidateValidator {
    inner: Arc<dyn ConfigValidator>,
}

impl CandidateValidator {
    pub fn new(inner: Arc<dyn ConfigValidator>) -> Self {
        Self { inner }
    }

    /// # Errors
    ///
    /// `Validation` with every violated constraint, or with `InvalidSchema`
    /// when the schema document does not compile.
    pub fn validate(
        &self,
        candidate: ConfigObject,
        schema: &SchemaDocument,
    ) -> Result<ConfigObject, PipelineError> {
        let instance = Value::Object(candidate.clone());
        match self.inner.validate(&instance, schema) {
            Ok(()) => Ok(candidate),
            Err(ConfigError::ValidationError(violations)) => Err(PipelineError::Validation(
                ValidationError::Violations(violations),
            )),
            Err(other) => Err(PipelineError::Validation(ValidationError::InvalidSchema(
                other.to_string(),
            ))),
        }
    }
}

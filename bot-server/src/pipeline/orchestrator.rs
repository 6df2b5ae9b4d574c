use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::pipeline::classifier::IntentClassifier;
use crate::pipeline::error::PipelineError;
use crate::pipeline::transformer::ConfigTransformer;
use crate::pipeline::validator::CandidateValidator;
use crate::pipeline::ConfigObject;

/// The sole input to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(rename = "input")]
    pub input_message: String,
}

impl UpdateRequest {
    pub fn new(input_message: impl Into<String>) -> Self {
        Self {
            input_message: input_message.into(),
        }
    }
}

/// A validated candidate configuration; nothing has been written anywhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub service: String,
    pub value: ConfigObject,
}

pub type UpdateResult = Result<UpdateOutcome, PipelineError>;

/// classify, then transform, then validate; first failure wins
#[derive(Clone)]
pub struct Orchestrator {
    classifier: IntentClassifier,
    transformer: ConfigTransformer,
    validator: CandidateValidator,
}

impl Orchestrator {
    pub fn new(
        classifier: IntentClassifier,
        transformer: ConfigTransformer,
        validator: CandidateValidator,
    ) -> Self {
        Self {
            classifier,
            transformer,
            validator,
        }
    }

    /// Runs one request; every failure is logged here with its stage
    pub async fn handle(&self, request: &UpdateRequest) -> UpdateResult {
        info!(input_len = request.input_message.len(), "Update request accepted");

        match self.run(request).await {
            Ok(outcome) => {
                info!(
                    service = %outcome.service,
                    fields = outcome.value.len(),
                    "Update request produced a valid configuration"
                );
                Ok(outcome)
            }
            Err(e) => {
                log_failure(&e);
                Err(e)
            }
        }
    }

    async fn run(&self, request: &UpdateRequest) -> UpdateResult {
        debug!(stage = "classification", "Entering stage");
        let service = self.classifier.classify(&request.input_message).await?;

        debug!(stage = "transform", service = %service, "Entering stage");
        let candidate = self
            .transformer
            .transform(&request.input_message, &service)
            .await?;

        debug!(stage = "validation", service = %service, "Entering stage");
        let value = self.validator.validate(candidate.proposed, &candidate.schema)?;

        Ok(UpdateOutcome {
            service: service.as_str().to_string(),
            value,
        })
    }
}

fn log_failure(e: &PipelineError) {
    if e.is_client_facing() {
        warn!(
            stage = %e.stage(),
            error_code = e.code(),
            error = %e,
            "Update request rejected"
        );
    } else {
        error!(
            stage = %e.stage(),
            error_code = e.code(),
            error = %e,
            "Update request failed"
        );
    }
}

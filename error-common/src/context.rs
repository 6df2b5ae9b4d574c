use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline step a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Request,
    Classification,
    SchemaFetch,
    ValuesFetch,
    Inference,
    OutputParse,
    Validation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Request => "request",
            Stage::Classification => "classification",
            Stage::SchemaFetch => "schema_fetch",
            Stage::ValuesFetch => "values_fetch",
            Stage::Inference => "inference",
            Stage::OutputParse => "output_parse",
            Stage::Validation => "validation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error context information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    pub request_id: Option<String>,
    pub stage: Option<Stage>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

}

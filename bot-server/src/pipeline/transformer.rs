use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clients::{InferenceClient, ModelRole, SchemaClient, ValuesClient};
use crate::pipeline::error::PipelineError;
use crate::pipeline::service::ServiceIdentifier;
use crate::pipeline::{ConfigObject, SchemaDocument};

pub const TRANSFORM_SYSTEM_PROMPT: &str = r#"You are a configuration update assistant. Your task is to process user requests and update a JSON configuration object while maintaining strict schema compliance.

## Core Responsibilities

1. **Parse user requests**: Understand configuration change requests from natural language input
2. **Update values**: Modify the current configuration JSON based on the request
3. **Maintain schema compliance**: Ensure all updates conform to the provided JSON schema structure
4. **Preserve existing data**: Only modify fields mentioned in the request; keep all other fields unchanged

## Input Format

You will receive:
- **Input message**: User's natural language request for configuration changes
- **Current values**: The existing configuration as a JSON object

## Output Format

Return ONLY the complete updated configuration as a single JSON object. Do not include:
- Explanatory text
- Markdown code blocks
- Comments or annotations
- A partial patch: every field of the current values must be present
- An outer wrapper key: the top-level keys are the configuration fields themselves

Use only standard JSON literals: true, false, null, and double-quoted keys and strings.

## Validation Rules

- All required fields from the schema must be present
- Field types must match schema definitions (string, number, boolean, array, object)
- Respect schema constraints (min/max values, enum options, patterns)
- Maintain nested object structures
- Preserve array structures unless explicitly asked to modify

## Example

Input message: "Set timeout to 30 and enable debug mode"
Current values: `{"timeout": 10, "debug": false, "api_key": "xyz"}`

Output: `{"timeout": 30, "debug": true, "api_key": "xyz"}`"#;

/// Output of the transform stage, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// The schema fetched for this request; validation must use this document
    pub schema: SchemaDocument,
    pub proposed: ConfigObject,
}

/// Produces a candidate updated configuration for one service
#[derive(Clone)]
pub struct ConfigTransformer {
    schemas: SchemaClient,
    values: ValuesClient,
    inference: Arc<InferenceClient>,
}

impl ConfigTransformer {
    pub fn new(schemas: SchemaClient, values: ValuesClient, inference: Arc<InferenceClient>) -> Self {
        Self {
            schemas,
            values,
            inference,
        }
    }

    /// # Errors
    ///
    /// Schema and values lookup failures, `Inference` when generation fails,
    /// `MalformedOutput` when the generated text is not a JSON object.
    pub async fn transform(
        &self,
        input_message: &str,
        service: &ServiceIdentifier,
    ) -> Result<Candidate, PipelineError> {
        // Both lookups start together; the schema error wins if both fail
        let (schema, current) = tokio::join!(self.schemas.get(service), self.values.get(service));
        let schema = schema?;
        let current = current?;
        debug!(service = %service, fields = current.len(), "Fetched schema and current values");

        let prompt = build_prompt(input_message, &current);

        let generated = if self.inference.supports_constrained_output() {
            self.inference
                .constrained(ModelRole::Transformer, TRANSFORM_SYSTEM_PROMPT, &prompt, &schema)
                .await
        } else {
            warn!(service = %service, "Backend lacks constrained output, embedding schema in prompt");
            let prompt = with_embedded_schema(prompt, &schema);
            self.inference
                .unconstrained(ModelRole::Transformer, TRANSFORM_SYSTEM_PROMPT, &prompt)
                .await
        }
        .map_err(|e| PipelineError::Inference(e.to_string()))?;

        let proposed = parse_candidate(&generated)?;

        Ok(Candidate {
            schema,
            proposed,
        })
    }
}

/// Embeds the literal instruction and the literal current values
pub fn build_prompt(input_message: &str, current: &ConfigObject) -> String {
    format!(
        "Input message: \"{}\"\nCurrent values: `{}`",
        input_message,
        Value::Object(current.clone())
    )
}

fn with_embedded_schema(prompt: String, schema: &SchemaDocument) -> String {
    format!("{}\nSchema: `{}`", prompt, schema)
}

/// Strict parse: one JSON object, nothing around it but whitespace
///
/// # Errors
///
/// `MalformedOutput` for invalid JSON or a JSON value that is not an object.
pub fn parse_candidate(text: &str) -> Result<ConfigObject, PipelineError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| PipelineError::MalformedOutput(e.to_string()))?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(PipelineError::MalformedOutput(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Configuration validation against JSON Schema documents
//!
//! Validation is a pure check: the candidate is never modified, coerced or
//! defaulted. A candidate either satisfies every constraint of the schema or
//! the caller gets back the full list of violated constraints.

use jsonschema::{error::ValidationErrorKind, JSONSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// A single violated schema constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON pointer into the candidate, empty for the root object
    pub instance_path: String,
    /// JSON pointer into the schema naming the violated keyword
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{} at {}", self.message, path)
    }
}

/// Checks a candidate configuration against a schema document
pub trait ConfigValidator: Send + Sync {
    /// # Errors
    ///
    /// `ValidationError` with every violated constraint, or `InvalidSchema`
    /// when the schema document itself cannot be compiled.
    fn validate(&self, candidate: &Value, schema: &Value) -> Result<()>;
}

/// `ConfigValidator` backed by the `jsonschema` crate
///
/// The draft is taken from the schema's `$schema` keyword, falling back to
/// draft 7. Schemas are compiled per call since every request fetches a fresh
/// document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigValidator for JsonSchemaValidator {
    fn validate(&self, candidate: &Value, schema: &Value) -> Result<()> {
        let compiled = JSONSchema::options()
            .compile(schema)
            .map_err(|e| ConfigError::InvalidSchema(e.to_string()))?;

        if let Err(errors) = compiled.validate(candidate) {
            let mut violations = Vec::new();
            for e in errors {
                // An unresolvable $ref is a defect of the schema, not of the candidate
                if let ValidationErrorKind::Resolver { .. } = e.kind {
                    return Err(ConfigError::InvalidSchema(e.to_string()));
                }
                violations.push(Violation {
                    instance_path: e.instance_path.to_string(),
                    schema_path: e.schema_path.to_string(),
                    message: e.to_string(),
                });
            }

            return Err(ConfigError::ValidationError(violations));
        }

        debug!("Candidate configuration satisfies schema");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn tournament_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["memoryMb"],
            "properties": {
                "memoryMb": { "type": "integer", "minimum": 128 },
                "cpuPercent": { "type": "integer", "minimum": 0, "maximum": 100 },
                "tier": { "enum": ["free", "pro"] },
                "limits": {
                    "type": "object",
                    "required": ["maxPlayers"],
                    "properties": { "maxPlayers": { "type": "integer" } }
                }
            }
        })
    }

    fn violations(result: Result<()>) -> Vec<Violation> {
        match result {
            Err(ConfigError::ValidationError(v)) => v,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_candidate_passes() {
        let validator = JsonSchemaValidator::new();
        let candidate = json!({ "memoryMb": 1024, "cpuPercent": 50 });
        assert!(validator.validate(&candidate, &tournament_schema()).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let validator = JsonSchemaValidator::new();
        let candidate = json!({ "cpuPercent": 50 });

        let found = violations(validator.validate(&candidate, &tournament_schema()));
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("memoryMb"));
        assert!(found[0].schema_path.contains("required"));
        assert_eq!(found[0].to_string(), format!("{} at /", found[0].message));
    }

    #[test]
    fn test_wrong_type_reports_instance_path() {
        let validator = JsonSchemaValidator::new();
        let candidate = json!({ "memoryMb": "1024mb" });

        let found = violations(validator.validate(&candidate, &tournament_schema()));
        assert_eq!(found[0].instance_path, "/memoryMb");
    }

    #[test]
    fn test_no_coercion_of_numeric_strings() {
        let validator = JsonSchemaValidator::new();
        let candidate = json!({ "memoryMb": 1024, "cpuPercent": "80" });
        assert!(validator.validate(&candidate, &tournament_schema()).is_err());
    }

    #[test]
    fn test_enum_and_nested_constraints() {
        let validator = JsonSchemaValidator::new();
        let candidate = json!({ "memoryMb": 512, "tier": "gold", "limits": {} });

        let found = violations(validator.validate(&candidate, &tournament_schema()));
        let paths: Vec<&str> = found.iter().map(|v| v.instance_path.as_str()).collect();
        assert!(paths.contains(&"/tier"));
        assert!(paths.contains(&"/limits"));
    }

    #[test]
    fn test_invalid_schema_document() {
        let validator = JsonSchemaValidator::new();
        let schema = json!({ "type": "not-a-type" });

        let result = validator.validate(&json!({}), &schema);
        assert!(matches!(result, Err(ConfigError::InvalidSchema(_))));
    }

    #[test]
    fn test_remote_reference_is_invalid_schema() {
        let validator = JsonSchemaValidator::new();
        let schema = json!({
            "type": "object",
            "properties": { "memoryMb": { "$ref": "http://127.0.0.1:1/defs.json" } }
        });

        let result = validator.validate(&json!({ "memoryMb": 1024 }), &schema);
        assert!(matches!(result, Err(ConfigError::InvalidSchema(_))));
    }

    #[test]
    fn test_local_reference_still_resolves() {
        let validator = JsonSchemaValidator::new();
        let schema = json!({
            "type": "object",
            "definitions": { "megabytes": { "type": "integer", "minimum": 128 } },
            "properties": { "memoryMb": { "$ref": "#/definitions/megabytes" } }
        });

        assert!(validator.validate(&json!({ "memoryMb": 1024 }), &schema).is_ok());
        let found = violations(validator.validate(&json!({ "memoryMb": 64 }), &schema));
        assert_eq!(found[0].instance_path, "/memoryMb");
    }

    proptest! {
        #[test]
        fn prop_validation_is_a_pure_predicate(memory in any::<i64>(), cpu in -50i64..150) {
            let validator = JsonSchemaValidator::new();
            let schema = tournament_schema();
            let candidate = json!({ "memoryMb": memory, "cpuPercent": cpu });
            let before = candidate.clone();

            let first = validator.validate(&candidate, &schema).is_ok();
            let second = validator.validate(&candidate, &schema).is_ok();

            prop_assert_eq!(first, second);
            prop_assert_eq!(candidate, before);
            prop_assert_eq!(first, memory >= 128 && (0..=100).contains(&cpu));
        }
    }
}

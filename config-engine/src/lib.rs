//! Configuration engine for ConfigBot
//!
//! This crate holds everything ConfigBot knows about configuration documents
//! that is independent of HTTP:
//! - JSON Schema validation of candidate configurations (`ConfigValidator`)
//! - Directory-backed document stores for schemas and current values
//! - Layered settings loading for the binaries (defaults, TOML file, environment)
//!
//! # Example
//!
//! ```rust
//! use config_engine::{ConfigValidator, JsonSchemaValidator};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["memoryMb"],
//!     "properties": { "memoryMb": { "type": "integer" } }
//! });
//!
//! let validator = JsonSchemaValidator::new();
//! assert!(validator.validate(&json!({ "memoryMb": 1024 }), &schema).is_ok());
//! assert!(validator.validate(&json!({ "cpuPercent": 50 }), &schema).is_err());
//! ```

pub mod providers;
pub mod settings;
pub mod validation;
pub mod error;

pub use providers::*;
pub use settings::*;
pub use validation::*;
pub use error::*;

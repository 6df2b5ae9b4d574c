//! The update pipeline: classify, transform, validate
//!
//! Each stage returns an explicit `Result`; the orchestrator is the only place
//! that logs failures and hands them to the HTTP layer.

pub mod classifier;
pub mod error;
pub mod orchestrator;
pub mod service;
pub mod transformer;
pub mod validator;

pub use classifier::IntentClassifier;
pub use error::{ClassificationError, PipelineError, ValidationError};
pub use orchestrator::{Orchestrator, UpdateOutcome, UpdateRequest, UpdateResult};
pub use service::{ServiceCatalog, ServiceIdentifier};
pub use transformer::{Candidate, ConfigTransformer};
pub use validator::CandidateValidator;

/// A service's configuration document, always a JSON object
pub type ConfigObject = serde_json::Map<String, serde_json::Value>;

/// A JSON Schema document, passed through verbatim
pub type SchemaDocument = serde_json::Value;

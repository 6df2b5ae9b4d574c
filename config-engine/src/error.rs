use thiserror::Error;

use crate::validation::Violation;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source not found: {0}")]
    SourceNotFound(String),

    #[error("Configuration source could not be read: {0}")]
    ReadError(String),

    #[error("Configuration parsing failed: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {}", summarize(.0))]
    ValidationError(Vec<Violation>),

    #[error("Schema document is not a valid JSON Schema: {0}")]
    InvalidSchema(String),

    #[error("Settings could not be loaded: {0}")]
    SettingsError(#[from] config::ConfigError),
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ConfigError>;

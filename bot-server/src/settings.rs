use config_engine::{load_settings, SettingsSource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::clients::RetryPolicy;

pub const ENV_PREFIX: &str = "CONFIGBOT";

/// Bot server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Inbound listen address, host:port
    pub listen: String,
    pub schema_store_url: String,
    pub values_store_url: String,
    pub inference: InferenceSettings,
    /// The service catalogue the classifier chooses from
    pub services: Vec<String>,
    pub strict_classification: bool,
    pub retry: RetryPolicy,
    /// Outbound call timeout; unset means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub url: String,
    pub classifier_model: String,
    pub transformer_model: String,
    /// Whether the backend honours the `format` schema hint
    pub constrained_output: bool,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:5003".to_string(),
            schema_store_url: "http://schema_service:5001".to_string(),
            values_store_url: "http://values_service:5002".to_string(),
            inference: InferenceSettings::default(),
            services: vec![
                "chat".to_string(),
                "matchmaking".to_string(),
                "tournament".to_string(),
            ],
            strict_classification: true,
            retry: RetryPolicy::default(),
            request_timeout_secs: None,
        }
    }
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            url: "http://ollama_service:11434".to_string(),
            classifier_model: "qwen3:0.6b".to_string(),
            transformer_model: "qwen3:4b".to_string(),
            constrained_output: true,
        }
    }
}

impl BotSettings {
    /// Defaults, then `file` if given, then `CONFIGBOT__*` environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the file is unreadable or a value has the
    /// wrong type.
    pub fn load(file: Option<&Path>) -> config_engine::Result<Self> {
        let source = SettingsSource::new(ENV_PREFIX)
            .with_file(file)
            .with_list_keys(&["services"]);
        load_settings(&source)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

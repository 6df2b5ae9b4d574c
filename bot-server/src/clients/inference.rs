//! Generative inference backend access
//!
//! The backend is Ollama's `POST /api/generate` in non-streaming mode. Two call
//! shapes are exposed through `InferenceClient`:
//! - **unconstrained**: free text, used for classification
//! - **constrained**: the schema document is passed as the `format` hint so the
//!   backend emits structured output of that shape
//!
//! Not every backend honours `format`; `InferenceCapabilities` says whether
//! the constrained shape is available.

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::clients::retry::RetryPolicy;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference request failed: {0}")]
    Transport(String),

    #[error("Inference backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Inference backend returned an unreadable envelope: {0}")]
    InvalidResponse(String),

    #[error("Invalid inference base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl InferenceError {
    pub fn is_transient(&self) -> bool {
        match self {
            InferenceError::Transport(_) => true,
            InferenceError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// What the backend can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceCapabilities {
    /// The backend accepts a JSON Schema output-shape constraint
    pub constrained_output: bool,
}

/// One generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub format: Option<Value>,
}

#[async_trait]
pub trait InferenceBackend: Send + Sync {
    fn capabilities(&self) -> InferenceCapabilities;

    /// Returns the generated text
    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError>;
}

#[derive(Serialize)]
struct OllamaGenerateBody<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a Value>,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// `InferenceBackend` for an Ollama server
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    http: reqwest::Client,
    endpoint: Url,
    capabilities: InferenceCapabilities,
}

impl OllamaBackend {
    /// # Errors
    ///
    /// `InvalidBaseUrl` if `base_url` cannot be joined with `api/generate`.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        capabilities: InferenceCapabilities,
    ) -> Result<Self, InferenceError> {
        let invalid = |message: String| InferenceError::InvalidBaseUrl {
            url: base_url.to_string(),
            message,
        };

        let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("api/generate").map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            capabilities,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    fn capabilities(&self) -> InferenceCapabilities {
        self.capabilities
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, InferenceError> {
        let body = OllamaGenerateBody {
            model: &request.model,
            system: &request.system,
            prompt: &request.prompt,
            format: request.format.as_ref(),
            stream: false,
        };

        debug!(
            model = %request.model,
            constrained = request.format.is_some(),
            prompt_len = request.prompt.len(),
            "Calling inference backend"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        Ok(envelope.response)
    }
}

/// Which configured model serves a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Classifier,
    Transformer,
}

/// The two call shapes over one backend
#[derive(Clone)]
pub struct InferenceClient {
    backend: Arc<dyn InferenceBackend>,
    classifier_model: String,
    transformer_model: String,
    retry: RetryPolicy,
}

impl InferenceClient {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        classifier_model: impl Into<String>,
        transformer_model: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            classifier_model: classifier_model.into(),
            transformer_model: transformer_model.into(),
            retry,
        }
    }

    pub fn supports_constrained_output(&self) -> bool {
        self.backend.capabilities().constrained_output
    }

    fn model(&self, role: ModelRole) -> &str {
        match role {
            ModelRole::Classifier => &self.classifier_model,
            ModelRole::Transformer => &self.transformer_model,
        }
    }

    /// Free-text generation
    ///
    /// # Errors
    ///
    /// Any `InferenceError` from the backend once retries are exhausted.
    pub async fn unconstrained(
        &self,
        role: ModelRole,
        system: &str,
        prompt: &str,
    ) -> Result<String, InferenceError> {
        self.call(role, system, prompt, None).await
    }

    /// Generation constrained to the shape of `schema`
    ///
    /// # Errors
    ///
    /// Any `InferenceError` from the backend once retries are exhausted.
    pub async fn constrained(
        &self,
        role: ModelRole,
        system: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, InferenceError> {
        self.call(role, system, prompt, Some(schema.clone())).await
    }

    async fn call(
        &self,
        role: ModelRole,
        system: &str,
        prompt: &str,
        format: Option<Value>,
    ) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model: self.model(role).to_string(),
            system: system.to_string(),
            prompt: prompt.to_string(),
            format,
        };

        self.retry
            .run("inference", InferenceError::is_transient, || {
                self.backend.generate(&request)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONSTRAINED: InferenceCapabilities = InferenceCapabilities {
        constrained_output: true,
    };

    #[test]
    fn test_endpoint_joins_api_path() {
        let backend =
            OllamaBackend::new(reqwest::Client::new(), "http://ollama_service:11434", CONSTRAINED)
                .unwrap();
        assert_eq!(backend.endpoint().as_str(), "http://ollama_service:11434/api/generate");

        let prefixed =
            OllamaBackend::new(reqwest::Client::new(), "http://gateway/ollama", CONSTRAINED)
                .unwrap();
        assert_eq!(prefixed.endpoint().as_str(), "http://gateway/ollama/api/generate");
    }

    #[test]
    fn test_body_omits_format_when_unconstrained() {
        let body = OllamaGenerateBody {
            model: "qwen3:0.6b",
            system: "sys",
            prompt: "hi",
            format: None,
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({ "model": "qwen3:0.6b", "system": "sys", "prompt": "hi", "stream": false })
        );
    }

    #[test]
    fn test_body_carries_schema_as_format() {
        let schema = json!({ "type": "object" });
        let body = OllamaGenerateBody {
            model: "qwen3:4b",
            system: "sys",
            prompt: "hi",
            format: Some(&schema),
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["format"], schema);
    }
}

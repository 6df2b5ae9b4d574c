use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No document for service '{0}'")]
    NotFound(String),

    #[error("Store request failed: {0}")]
    Transport(String),

    #[error("Store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Store returned an invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid store base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl StoreError {
    /// Connection failures and server-side errors may succeed on a second try
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Transport(_) => true,
            StoreError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Read-only lookup of one JSON document per service
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn fetch(&self, service: &str) -> Result<Value, StoreError>;
}

/// `ConfigStore` speaking `GET {base}/{service}`
#[derive(Debug, Clone)]
pub struct HttpStoreClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpStoreClient {
    /// # Errors
    ///
    /// `InvalidBaseUrl` if `base_url` is not an absolute http(s) URL.
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, StoreError> {
        let invalid = |message: String| StoreError::InvalidBaseUrl {
            url: base_url.to_string(),
            message,
        };

        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The service name becomes a single, percent-encoded path segment
    fn document_url(&self, service: &str) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Transport(format!("cannot build URL for '{}'", service)))?
            .pop_if_empty()
            .push(service);
        Ok(url)
    }
}

#[async_trait]
impl ConfigStore for HttpStoreClient {
    async fn fetch(&self, service: &str) -> Result<Value, StoreError> {
        let url = self.document_url(service)?;
        debug!(url = %url, "Fetching document");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(service.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))
    }
}

use serde_json::Value;
use std::sync::Arc;

use crate::clients::retry::RetryPolicy;
use crate::clients::store::{ConfigStore, StoreError};
use crate::pipeline::error::PipelineError;
use crate::pipeline::service::ServiceIdentifier;
use crate::pipeline::ConfigObject;

/// Accessor for the values store
#[derive(Clone)]
pub struct ValuesClient {
    store: Arc<dyn ConfigStore>,
    retry: RetryPolicy,
}

impl ValuesClient {
    pub fn new(store: Arc<dyn ConfigStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// # Errors
    ///
    /// `ValuesNotFound` when the store has no values for the service,
    /// `ValuesFetch` for every other store failure, including a document
    /// that is not a JSON object.
    pub async fn get(&self, service: &ServiceIdentifier) -> Result<ConfigObject, PipelineError> {
        let name = service.as_str();
        let document = self
            .retry
            .run("values_fetch", StoreError::is_transient, || self.store.fetch(name))
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => PipelineError::ValuesNotFound(name.to_string()),
                other => PipelineError::ValuesFetch {
                    service: name.to_string(),
                    message: other.to_string(),
                },
            })?;

        match document {
            Value::Object(values) => Ok(values),
            _ => Err(PipelineError::ValuesFetch {
                service: name.to_string(),
                message: "values document is not a JSON object".to_string(),
            }),
        }
    }
}

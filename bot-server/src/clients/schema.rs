use std::sync::Arc;

use crate::clients::retry::RetryPolicy;
use crate::clients::store::{ConfigStore, StoreError};
use crate::pipeline::error::PipelineError;
use crate::pipeline::service::ServiceIdentifier;
use crate::pipeline::SchemaDocument;

/// Accessor for the schema store
#[derive(Clone)]
pub struct SchemaClient {
    store: Arc<dyn ConfigStore>,
    retry: RetryPolicy,
}

impl SchemaClient {
    pub fn new(store: Arc<dyn ConfigStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    /// # Errors
    ///
    /// `SchemaNotFound` when the store has no schema for the service,
    /// `SchemaFetch` for every other store failure.
    pub async fn get(&self, service: &ServiceIdentifier) -> Result<SchemaDocument, PipelineError> {
        let name = service.as_str();
        self.retry
            .run("schema_fetch", StoreError::is_transient, || self.store.fetch(name))
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => PipelineError::SchemaNotFound(name.to_string()),
                other => PipelineError::SchemaFetch {
                    service: name.to_string(),
                    message: other.to_string(),
                },
            })
    }
}

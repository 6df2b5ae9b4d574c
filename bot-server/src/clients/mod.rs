//! Accessors for the three external collaborators

pub mod inference;
pub mod retry;
pub mod schema;
pub mod store;
pub mod values;

pub use inference::{
    GenerateRequest, InferenceBackend, InferenceCapabilities, InferenceClient, InferenceError,
    ModelRole, OllamaBackend,
};
pub use retry::RetryPolicy;
pub use schema::SchemaClient;
pub use store::{ConfigStore, HttpStoreClient, StoreError};
pub use values::ValuesClient;

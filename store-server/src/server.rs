use clap::ValueEnum;
use config_engine::{DocumentStore, FileDocumentStore};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Which documents this instance serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Schema,
    Values,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Schema => "schema",
            StoreKind::Values => "values",
        }
    }

    pub fn default_dir(&self) -> PathBuf {
        match self {
            StoreKind::Schema => PathBuf::from("data/schemas"),
            StoreKind::Values => PathBuf::from("data/values"),
        }
    }

    pub fn default_listen(&self) -> &'static str {
        match self {
            StoreKind::Schema => "0.0.0.0:5001",
            StoreKind::Values => "0.0.0.0:5002",
        }
    }

    pub fn file_store(&self, dir: impl Into<PathBuf>) -> FileDocumentStore {
        match self {
            StoreKind::Schema => FileDocumentStore::schemas(dir),
            StoreKind::Values => FileDocumentStore::values(dir),
        }
    }
}

/// Shared state for the store server
#[derive(Clone)]
pub struct StoreServer {
    pub kind: StoreKind,
    pub store: Arc<dyn DocumentStore>,
}

impl StoreServer {
    pub fn new(kind: StoreKind, store: Arc<dyn DocumentStore>) -> Self {
        Self { kind, store }
    }

    /// Directory-backed store of the given kind
    pub fn from_dir(kind: StoreKind, dir: impl Into<PathBuf>) -> Self {
        Self::new(kind, Arc::new(kind.file_store(dir)))
    }
}

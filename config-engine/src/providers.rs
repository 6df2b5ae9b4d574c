//! Document stores backing the schema and values lookup services
//!
//! A store maps a service name to one JSON document. The only backend is a
//! directory of files named `{name}{suffix}`, re-read on every lookup.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{ConfigError, Result};

pub const SCHEMA_SUFFIX: &str = ".schema.json";
pub const VALUES_SUFFIX: &str = ".value.json";

/// Lookup of a JSON document by service name
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// # Errors
    ///
    /// `SourceNotFound` if no document exists for `name`, `ReadError` or
    /// `ParseError` if it exists but cannot be loaded.
    async fn load(&self, name: &str) -> Result<Value>;
}

/// Service names are plain identifiers; anything else never reaches the filesystem
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Directory-backed store
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    dir: PathBuf,
    suffix: String,
}

impl FileDocumentStore {
    pub fn new(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    pub fn schemas(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, SCHEMA_SUFFIX)
    }

    pub fn values(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, VALUES_SUFFIX)
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", name, self.suffix))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self, name: &str) -> Result<Value> {
        if !is_valid_name(name) {
            return Err(ConfigError::SourceNotFound(name.to_string()));
        }

        let path = self.path_for(name);
        debug!(path = %path.display(), "Loading document");

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::SourceNotFound(name.to_string()));
            }
            Err(e) => {
                return Err(ConfigError::ReadError(format!("{}: {}", path.display(), e)));
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, FileDocumentStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let store = FileDocumentStore::values(dir.path());
        (dir, store)
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("chat"));
        assert!(is_valid_name("match-making_2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("../etc/passwd"));
        assert!(!is_valid_name("chat.schema"));
    }

    #[tokio::test]
    async fn test_load_existing_document() {
        let (_dir, store) = store_with(&[("chat.value.json", r#"{"cpuPercent": 90}"#)]);

        let value = store.load("chat").await.unwrap();
        assert_eq!(value, json!({ "cpuPercent": 90 }));
    }

    #[tokio::test]
    async fn test_repeated_loads_are_identical() {
        let (_dir, store) = store_with(&[("chat.value.json", r#"{"a": [1, 2], "b": {"c": true}}"#)]);

        let first = store.load("chat").await.unwrap();
        let second = store.load("chat").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(store.load("chat").await, Err(ConfigError::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_suffix_selects_store_kind() {
        let (dir, _) = store_with(&[("chat.schema.json", r#"{"type": "object"}"#)]);
        let schemas = FileDocumentStore::schemas(dir.path());
        let values = FileDocumentStore::values(dir.path());

        assert!(schemas.load("chat").await.is_ok());
        assert!(matches!(values.load("chat").await, Err(ConfigError::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_traversal_is_not_found() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(
            store.load("../secret").await,
            Err(ConfigError::SourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let (_dir, store) = store_with(&[("chat.value.json", "{ not json")]);
        assert!(matches!(store.load("chat").await, Err(ConfigError::ParseError(_))));
    }
}

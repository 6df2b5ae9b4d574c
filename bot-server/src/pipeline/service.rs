use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifier output resolved against the service catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ServiceIdentifier {
    /// A member of the catalogue
    Known(String),
    /// Raw classifier text matching no catalogue entry
    Unknown(String),
}

impl ServiceIdentifier {
    pub fn as_str(&self) -> &str {
        match self {
            ServiceIdentifier::Known(name) | ServiceIdentifier::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ServiceIdentifier::Known(_))
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of services the classifier may answer with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: Vec<String>,
}

impl ServiceCatalog {
    pub fn new<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for service in services {
            let service = service.into().trim().to_string();
            if !service.is_empty() && !unique.contains(&service) {
                unique.push(service);
            }
        }
        Self { services: unique }
    }

    pub fn names(&self) -> &[String] {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Exact match only; no case folding or fuzzy matching
    pub fn resolve(&self, raw: &str) -> ServiceIdentifier {
        if self.services.iter().any(|s| s == raw) {
            ServiceIdentifier::Known(raw.to_string())
        } else {
            ServiceIdentifier::Unknown(raw.to_string())
        }
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new(["chat", "matchmaking", "tournament"])
    }
}

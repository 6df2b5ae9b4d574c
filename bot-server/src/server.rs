use config_engine::JsonSchemaValidator;
use error_common::{ConfigBotError, Result};
use std::sync::Arc;
use tracing::info;

use crate::clients::{
    HttpStoreClient, InferenceCapabilities, InferenceClient, OllamaBackend, SchemaClient,
    ValuesClient,
};
use crate::pipeline::{
    CandidateValidator, ConfigTransformer, IntentClassifier, Orchestrator, ServiceCatalog,
};
use crate::settings::BotSettings;

/// Shared state for the bot server
#[derive(Clone)]
pub struct BotServer {
    pub settings: Arc<BotSettings>,
    /// The normalised service list the classifier chooses from
    pub catalog: Arc<ServiceCatalog>,
    pub orchestrator: Arc<Orchestrator>,
}

impl BotServer {
    pub fn new(
        settings: BotSettings,
        catalog: Arc<ServiceCatalog>,
        orchestrator: Orchestrator,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            catalog,
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Wire the pipeline against the configured stores and backend
    pub fn from_settings(settings: BotSettings) -> Result<Self> {
        let catalog = Arc::new(ServiceCatalog::new(settings.services.iter().cloned()));
        if catalog.is_empty() {
            return Err(ConfigBotError::ConfigError(
                "At least one service must be configured".to_string(),
            ));
        }

        let mut http = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| ConfigBotError::ConfigError(format!("HTTP client: {}", e)))?;

        let schema_store = HttpStoreClient::new(http.clone(), &settings.schema_store_url)
            .map_err(|e| ConfigBotError::ConfigError(e.to_string()))?;
        let values_store = HttpStoreClient::new(http.clone(), &settings.values_store_url)
            .map_err(|e| ConfigBotError::ConfigError(e.to_string()))?;
        let backend = OllamaBackend::new(
            http,
            &settings.inference.url,
            InferenceCapabilities {
                constrained_output: settings.inference.constrained_output,
            },
        )
        .map_err(|e| ConfigBotError::ConfigError(e.to_string()))?;

        info!(
            schema_store = %schema_store.base_url(),
            values_store = %values_store.base_url(),
            inference = %backend.endpoint(),
            services = ?catalog.names(),
            strict = settings.strict_classification,
            "Pipeline configured"
        );

        let inference = Arc::new(InferenceClient::new(
            Arc::new(backend),
            settings.inference.classifier_model.clone(),
            settings.inference.transformer_model.clone(),
            settings.retry,
        ));

        let orchestrator = Orchestrator::new(
            IntentClassifier::new(
                inference.clone(),
                catalog.clone(),
                settings.strict_classification,
            ),
            ConfigTransformer::new(
                SchemaClient::new(Arc::new(schema_store), settings.retry),
                ValuesClient::new(Arc::new(values_store), settings.retry),
                inference,
            ),
            CandidateValidator::new(Arc::new(JsonSchemaValidator::new())),
        );

        Ok(Self::new(settings, catalog, orchestrator))
    }
}

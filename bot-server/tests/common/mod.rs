#![allow(dead_code)]

use bot_server::{BotServer, BotSettings};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLASSIFIER_MODEL: &str = "qwen3:0.6b";
pub const TRANSFORMER_MODEL: &str = "qwen3:4b";

/// Fake schema store, values store and inference backend
pub struct Harness {
    pub schemas: MockServer,
    pub values: MockServer,
    pub inference: MockServer,
}

impl Harness {
    pub async fn start() -> Self {
        Self {
            schemas: MockServer::start().await,
            values: MockServer::start().await,
            inference: MockServer::start().await,
        }
    }

    pub fn settings(&self) -> BotSettings {
        let mut settings = BotSettings::default();
        settings.schema_store_url = self.schemas.uri();
        settings.values_store_url = self.values.uri();
        settings.inference.url = self.inference.uri();
        settings.retry.backoff_ms = 0;
        settings
    }

    pub fn server(&self) -> BotServer {
        BotServer::from_settings(self.settings()).unwrap()
    }

    pub async fn serve_schema(&self, service: &str, schema: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", service)))
            .respond_with(ResponseTemplate::new(200).set_body_json(schema))
            .mount(&self.schemas)
            .await;
    }

    pub async fn serve_values(&self, service: &str, values: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", service)))
            .respond_with(ResponseTemplate::new(200).set_body_json(values))
            .mount(&self.values)
            .await;
    }

    pub async fn classifier_answers(&self, text: &str) {
        self.model_answers(CLASSIFIER_MODEL, text).await;
    }

    pub async fn transformer_answers(&self, text: &str) {
        self.model_answers(TRANSFORMER_MODEL, text).await;
    }

    async fn model_answers(&self, model: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({ "model": model, "stream": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_response(text)))
            .mount(&self.inference)
            .await;
    }
}

pub fn generate_response(text: &str) -> Value {
    json!({ "model": "test", "response": text, "done": true })
}

pub fn tournament_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["memoryMb", "cpuPercent"],
        "properties": {
            "memoryMb": { "type": "integer", "minimum": 128 },
            "cpuPercent": { "type": "integer", "minimum": 1, "maximum": 100 },
            "env": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            }
        }
    })
}

pub fn tournament_values() -> Value {
    json!({ "memoryMb": 512, "cpuPercent": 50, "env": { "GAME_NAME": "toyblast" } })
}

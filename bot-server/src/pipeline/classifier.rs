use std::sync::Arc;
use tracing::debug;

use crate::clients::{InferenceClient, ModelRole};
use crate::pipeline::error::{ClassificationError, PipelineError};
use crate::pipeline::service::{ServiceCatalog, ServiceIdentifier};

/// Example instructions for the default services
const EXAMPLES: &[(&str, &str)] = &[
    ("set tournament service memory to 1024mb", "tournament"),
    ("set GAME_NAME env to toyblast for matchmaking service", "matchmaking"),
    ("lower cpu limit of chat service to 80%", "chat"),
];

/// Maps a free-text instruction to the service it targets
#[derive(Clone)]
pub struct IntentClassifier {
    inference: Arc<InferenceClient>,
    catalog: Arc<ServiceCatalog>,
    strict: bool,
    system_prompt: String,
}

impl IntentClassifier {
    /// With `strict`, an answer outside the catalogue fails here instead of at
    /// the schema lookup
    pub fn new(inference: Arc<InferenceClient>, catalog: Arc<ServiceCatalog>, strict: bool) -> Self {
        let system_prompt = build_system_prompt(&catalog);
        Self {
            inference,
            catalog,
            strict,
            system_prompt,
        }
    }

    /// # Errors
    ///
    /// `Classification` when the inference call fails, when the backend
    /// answers with nothing, or (strict mode) with an unknown service.
    pub async fn classify(&self, input_message: &str) -> Result<ServiceIdentifier, PipelineError> {
        let raw = self
            .inference
            .unconstrained(ModelRole::Classifier, &self.system_prompt, input_message)
            .await
            .map_err(|e| PipelineError::Classification(ClassificationError::Transport(e.to_string())))?;

        let answer = raw.trim();
        if answer.is_empty() {
            return Err(PipelineError::Classification(ClassificationError::Empty));
        }

        let service = self.catalog.resolve(answer);
        debug!(service = %service, known = service.is_known(), "Classified instruction");

        match service {
            ServiceIdentifier::Unknown(name) if self.strict => Err(PipelineError::Classification(
                ClassificationError::Unrecognized(name),
            )),
            service => Ok(service),
        }
    }
}

fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{}\"", n)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, [only])) => format!("{} or {}", only, last),
        Some((last, rest)) => format!("{}, or {}", rest.join(", "), last),
    }
}

fn build_system_prompt(catalog: &ServiceCatalog) -> String {
    let names = catalog.names();
    let plain = names.join(", ");
    let quoted = quoted_list(names);

    let mut prompt = format!(
        "You are a service classifier.\n\
         Given user input, determine which service they need: {plain}.\n\
         Think step-by-step:\n\
         1. Identify service name or related keywords\n\
         2. Consider the configuration or action\n\
         3. Output only: {quoted}. Output nothing else: no explanation, no punctuation, no quotes."
    );

    let examples: Vec<String> = EXAMPLES
        .iter()
        .filter(|(_, service)| names.iter().any(|n| n == service))
        .map(|(input, service)| format!("   \"{}\" -> {}", input, service))
        .collect();
    if !examples.is_empty() {
        prompt.push_str("\nExamples:\n");
        prompt.push_str(&examples.join("\n"));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_service() {
        let prompt = build_system_prompt(&ServiceCatalog::default());
        assert!(prompt.contains("\"chat\", \"matchmaking\", or \"tournament\""));
        assert!(prompt.contains("\"lower cpu limit of chat service to 80%\" -> chat"));
    }

    #[test]
    fn test_prompt_skips_examples_for_absent_services() {
        let prompt = build_system_prompt(&ServiceCatalog::new(["chat", "leaderboard"]));
        assert!(prompt.contains("\"chat\" or \"leaderboard\""));
        assert!(!prompt.contains("-> tournament"));
        assert!(prompt.contains("-> chat"));
    }

    #[test]
    fn test_quoted_list_shapes() {
        assert_eq!(quoted_list(&[]), "");
        assert_eq!(quoted_list(&["chat".to_string()]), "\"chat\"");
        assert_eq!(
            quoted_list(&["a".to_string(), "b".to_string()]),
            "\"a\" or \"b\""
        );
        assert_eq!(
            quoted_list(&["a".to_string(), "b".to_string(), "c".to_string()]),
            "\"a\", \"b\", or \"c\""
        );
    }
}

use thiserror::Error;

/// Process-level error for the ConfigBot binaries
#[derive(Error, Debug)]
pub enum ConfigBotError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Logging/tracing setup errors
    #[error("Telemetry error: {0}")]
    TelemetryError(String),

    /// Wrapped external errors, displayed with their full context chain
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for ConfigBot startup operations
pub type Result<T> = std::result::Result<T, ConfigBotError>;

/// Async logging function for errors
pub async fn log_error(context: &str, error: &ConfigBotError) {
    tracing::error!(
        context = context,
        error = %error,
        "ConfigBot error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category() {
        let err = ConfigBotError::NetworkError("Failed to bind to 0.0.0.0:5003".to_string());
        assert_eq!(err.to_string(), "Network error: Failed to bind to 0.0.0.0:5003");
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: ConfigBotError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_anyhow_context_chain_is_displayed() {
        use anyhow::Context;

        let parse: std::result::Result<u16, _> = "not-a-port".parse::<u16>();
        let err: ConfigBotError = parse
            .context("Failed to load settings from bot.toml")
            .unwrap_err()
            .into();

        let text = err.to_string();
        assert!(text.starts_with("Failed to load settings from bot.toml: "));
        assert!(text.contains("invalid digit"));
    }
}

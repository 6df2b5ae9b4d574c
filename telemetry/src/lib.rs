//! Structured logging setup for the ConfigBot binaries
//!
//! Both the bot server and the store servers log through `tracing`. This crate
//! installs the global subscriber once at startup:
//!
//! - **Development** (`CONFIGBOT_ENV=development`, the default): human-readable
//!   lines with targets, file and line numbers
//! - **Anything else**: JSON lines with RFC 3339 timestamps, suitable for log
//!   shipping
//!
//! `RUST_LOG` always wins over the computed default filter.
//!
//! # Example
//!
//! ```rust,no_run
//! use telemetry::{init_tracing, LogSettings};
//!
//! let settings = LogSettings::from_env("bot_server", false);
//! init_tracing(&settings).unwrap();
//! tracing::info!(listen = "0.0.0.0:5003", "Starting bot server");
//! ```

pub mod error;

pub use error::*;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Development environments get pretty output, everything else JSON
    pub fn for_environment(env: &str) -> Self {
        if env.eq_ignore_ascii_case("development") {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

/// Logging configuration for one binary
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Crate target that gets the verbose level, e.g. `bot_server`
    pub target: String,
    pub verbose: bool,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn new(target: impl Into<String>, verbose: bool, format: LogFormat) -> Self {
        Self {
            target: target.into(),
            verbose,
            format,
        }
    }

    /// Read the format from `CONFIGBOT_ENV`
    pub fn from_env(target: impl Into<String>, verbose: bool) -> Self {
        let env = std::env::var("CONFIGBOT_ENV").unwrap_or_else(|_| "development".to_string());
        Self::new(target, verbose, LogFormat::for_environment(&env))
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        let level = if self.verbose { Level::DEBUG } else { Level::INFO };
        format!(
            "{}={},config_engine={},tower_http=info,hyper=info,reqwest=info",
            self.target, level, level
        )
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns `InvalidFilter` if the computed filter does not parse and
/// `TracingError` if a global subscriber is already installed.
pub fn init_tracing(settings: &LogSettings) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(settings.default_filter())
            .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match settings.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(true)
                    .with_level(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| TelemetryError::TracingError(e.to_string()))
}

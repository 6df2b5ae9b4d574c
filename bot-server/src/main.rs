use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use bot_server::{create_app, BotServer, BotSettings};
use error_common::{log_error, ConfigBotError, Result};
use telemetry::{init_tracing, LogSettings};

/// ConfigBot HTTP server
#[derive(Parser, Debug)]
#[command(name = "bot-server")]
#[command(about = "Natural-language configuration updates validated against JSON Schema")]
struct Args {
    /// Listen address (host:port); overrides the settings file
    #[arg(short, long)]
    listen: Option<String>,

    /// TOML settings file
    #[arg(short, long, env = "CONFIGBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&LogSettings::from_env("bot_server", args.verbose))
        .map_err(|e| ConfigBotError::TelemetryError(e.to_string()))?;

    if let Err(e) = run(args).await {
        log_error("bot-server", &e).await;
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let mut settings = BotSettings::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load settings from {}", path.display()),
        None => "Failed to load settings".to_string(),
    })?;
    if let Some(listen) = args.listen {
        settings.listen = listen;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ConfigBot server");

    let listen = settings.listen.clone();
    let server = BotServer::from_settings(settings)?;
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| ConfigBotError::NetworkError(format!("Failed to bind to {}: {}", listen, e)))?;

    info!(listen = %listen, "Accepting requests on POST /message");

    axum::serve(listener, app)
        .await
        .map_err(|e| ConfigBotError::ServerError(format!("HTTP server error: {}", e)))
}

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use error_common::{log_error, ConfigBotError, Result};
use store_server::{create_app, StoreKind, StoreServer};
use telemetry::{init_tracing, LogSettings};

/// ConfigBot schema / values store
#[derive(Parser, Debug)]
#[command(name = "store-server")]
#[command(about = "Serves one JSON document per service from a directory")]
struct Args {
    /// Which documents to serve
    #[arg(short, long, value_enum, env = "CONFIGBOT_STORE_KIND")]
    kind: StoreKind,

    /// Document directory (default depends on --kind)
    #[arg(short, long, env = "CONFIGBOT_STORE_DIR")]
    dir: Option<PathBuf>,

    /// Listen address, host:port (default depends on --kind)
    #[arg(short, long, env = "CONFIGBOT_STORE_LISTEN")]
    listen: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&LogSettings::from_env("store_server", args.verbose))
        .map_err(|e| ConfigBotError::TelemetryError(e.to_string()))?;

    if let Err(e) = run(args).await {
        log_error("store-server", &e).await;
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let kind = args.kind;
    let dir = args.dir.unwrap_or_else(|| kind.default_dir());
    let listen = args
        .listen
        .unwrap_or_else(|| kind.default_listen().to_string());

    if !dir.is_dir() {
        return Err(ConfigBotError::ConfigError(format!(
            "Document directory {} does not exist",
            dir.display()
        )));
    }

    info!(kind = kind.as_str(), dir = %dir.display(), "Starting store server");

    let app = create_app(StoreServer::from_dir(kind, dir));

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| ConfigBotError::NetworkError(format!("Failed to bind to {}: {}", listen, e)))?;

    info!(listen = %listen, "Serving documents on GET /{{name}}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ConfigBotError::ServerError(format!("HTTP server error: {}", e)))
}

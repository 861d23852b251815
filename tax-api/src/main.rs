use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use tax_api::{ApiConfig, AppState, build_router, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax regime calculator service.
///
/// Serves tax calculation, regime comparison, Form 16 extraction and a tax
/// assistant over HTTP.
#[derive(Debug, Parser)]
#[command(name = "tax-api")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding the config file.
    #[arg(short, long)]
    port: Option<u16>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<ApiConfig> {
    let mut config = match &cli.config {
        Some(path) => ApiConfig::load(path)?,
        None => ApiConfig::default(),
    };
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    Ok(config)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    debug!(?config, "configuration loaded");
    info!("Starting tax-api v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.bind_address();
    let state = AppState::from_config(config)?;

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

//! # edge-vc: Binary Entry Point
//!
//! Parses the command line, initializes tracing and the Prometheus recorder,
//! and serves the Axum router on the configured host URL.

use anyhow::Context;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;

use edgevc_api::cli::{Cli, Command, LogFormat};
use edgevc_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Start(args) => {
            init_tracing(args.log_format);
            let config = args.into_config().map_err(|e| {
                tracing::error!("{e}");
                e
            })?;
            start(config).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn start(config: AppConfig) -> anyhow::Result<()> {
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!("Prometheus recorder not installed: {e}. /metrics will return 404.");
            None
        }
    };

    tracing::info!(
        id_prefix = %config.credential_id_prefix,
        id_strategy = ?config.id_strategy,
        "issuance pipeline configured"
    );

    let host_url = config.host_url.clone();
    let state = AppState::with_config(config).with_metrics(metrics);
    let app = edgevc_api::app(state);

    let listener = tokio::net::TcpListener::bind(host_url.as_str())
        .await
        .with_context(|| format!("failed to bind {host_url}"))?;
    tracing::info!("edge-vc listening on {}", host_url);

    axum::serve(listener, app).await?;

    Ok(())
}

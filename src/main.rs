//! endoflife-exporter binary entry point.
//!
//! Loads the configuration, builds the exporter and serves `/metrics` until
//! SIGINT/SIGTERM. Core functionality is provided by the
//! `endoflife_exporter` library crate.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use endoflife_exporter::{
    AppConfig, Exporter,
    config::parse_duration,
    server::{AppState, create_router},
};
use strum_macros::Display;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
enum LogFormat {
    /// Human readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// endoflife.date Prometheus exporter
#[derive(Parser, Debug)]
#[command(name = "endoflife-exporter", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yml", env = "CONFIG_FILE")]
    config: String,

    /// Server bind address (overrides config file)
    #[arg(long, env = "SERVER_BIND")]
    server_bind: Option<String>,

    /// Server port (overrides config file)
    #[arg(long, env = "SERVER_PORT")]
    server_port: Option<u16>,

    /// Deadline for one scrape, e.g. "10s" (overrides config file)
    #[arg(long, env = "SCRAPE_TIMEOUT", value_parser = parse_duration)]
    scrape_timeout: Option<Duration>,

    /// Log level or filter directives; RUST_LOG takes precedence
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_format);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_format = %cli.log_format,
        "endoflife exporter starting"
    );

    // Load configuration from file
    tracing::info!(file = %cli.config, "Loading configuration");
    let mut config = AppConfig::load(&cli.config)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load configuration"))?;

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(bind) = cli.server_bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.server_port {
        config.server.port = port;
    }
    if let Some(scrape_timeout) = cli.scrape_timeout {
        config.upstream.scrape_timeout = scrape_timeout;
    }
    config
        .validate()
        .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

    let exporter = Exporter::from_config(&config)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to create exporter"))?;

    tracing::info!(
        upstream = %config.upstream.base_url,
        products = exporter.products().len(),
        request_timeout_ms = config.upstream.request_timeout.as_millis(),
        scrape_timeout_ms = config.upstream.scrape_timeout.as_millis(),
        "Configuration loaded"
    );

    let app = create_router(AppState {
        exporter: Arc::new(exporter),
    });

    let addr = config.socket_addr()?;

    tracing::info!("Metrics available at: http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Resolve once SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }

    tracing::info!("Shutdown started");
}

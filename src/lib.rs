//! endoflife-exporter - release lifecycle metrics for Prometheus
//!
//! Polls the [endoflife.date](https://endoflife.date) API and republishes
//! release cycle data (EOL status, LTS flag, latest version, key dates) as
//! Prometheus gauges. It can be used as a library, or run as a standalone
//! binary with the `endoflife-exporter` executable.
//!
//! # Architecture
//!
//! - **Upstream** ([`endoflife`]): HTTP client and record normalization
//! - **Collector** ([`collector`]): per-scrape fan-out over configured products
//! - **Metrics** ([`metrics`]): static descriptors and text exposition
//! - **Config** ([`config`]): YAML configuration with defaults and validation
//! - **Server** ([`server`]): axum router serving `/metrics`
//!
//! # Example
//!
//! ```rust,no_run
//! use endoflife_exporter::{AppConfig, Exporter, server};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load("config.yml")?;
//!     let exporter = Arc::new(Exporter::from_config(&config)?);
//!     let app = server::create_router(server::AppState { exporter });
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod endoflife;
pub mod metrics;
pub mod server;

pub use collector::Exporter;
pub use config::{AppConfig, ConfigError, ProductConfig};
pub use endoflife::{EndOfLifeClient, ReleaseDetails, ReleaseSource, UpstreamError};
pub use metrics::{Sample, render_prometheus};

//! Configuration module for the exporter.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Server settings (port, bind address)
//! - Upstream settings (base URL, request and scrape timeouts)
//! - Product selection (name, release cycles or all releases)

mod app;
mod product;
mod validation;

pub use app::{AppConfig, ServerConfig, UpstreamConfig};
pub use product::{ProductConfig, ReleaseSelection};
pub use validation::{ConfigError, parse_duration};

// Re-export constants
pub use app::{DEFAULT_PORT, DEFAULT_SCRAPE_TIMEOUT};
pub use product::DEFAULT_RELEASE;

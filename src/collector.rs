//! Collector Layer
//!
//! Turns upstream release data into metric samples on every scrape.
//!
//! # Architecture
//!
//! - [`Exporter`]: runs one collection pass over the configured products
//! - [`release_samples`]: the four samples exported per release cycle
//!
//! # Example
//!
//! ```rust,no_run
//! use endoflife_exporter::config::AppConfig;
//! use endoflife_exporter::collector::Exporter;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load("config.yml")?;
//! let exporter = Exporter::from_config(&config)?;
//! let body = exporter.render().await;
//! print!("{body}");
//! # Ok(())
//! # }
//! ```

mod exporter;

pub use exporter::{Exporter, release_samples};

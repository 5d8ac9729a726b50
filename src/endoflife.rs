//! endoflife.date upstream client.
//!
//! Fetches release cycles of a product and normalizes them into
//! [`ReleaseDetails`].
//!
//! - [`ReleaseSource`]: capability trait the collector depends on
//! - [`EndOfLifeClient`]: reqwest-based implementation
//! - [`UpstreamError`]: transport / status / decode failures
//!
//! # Example
//!
//! ```rust,no_run
//! use endoflife_exporter::endoflife::{EndOfLifeClient, ReleaseSource, DEFAULT_BASE_URL};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EndOfLifeClient::new(DEFAULT_BASE_URL, Duration::from_secs(10))?;
//! let release = client.fetch_release("mongo", "8.0").await?;
//! println!("{} -> {}", release.release_cycle_name, release.latest_version);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod release;

pub use client::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, EndOfLifeClient, ReleaseSource};
pub use error::UpstreamError;
pub use release::{
    NO_EOL_ANNOUNCED_SECS, NOT_AVAILABLE, RawRelease, ReleaseDetails, no_eol_announced,
    parse_date, unknown_date,
};

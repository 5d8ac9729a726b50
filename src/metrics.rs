//! Metrics model and exposition.
//!
//! - [`MetricDesc`]: static descriptor of a metric family
//! - [`Sample`]: one labelled gauge value
//! - [`render_prometheus`]: Prometheus text format for the `/metrics` endpoint

pub mod descriptor;
mod prometheus;
mod sample;

pub use descriptor::{
    DESCRIPTORS, EOL_FROM_TIMESTAMP, LATEST_VERSION_TIMESTAMP, MetricDesc, PRODUCT_INFO,
    RELEASE_CYCLE_TIMESTAMP,
};
pub use prometheus::{CONTENT_TYPE, render_prometheus};
pub use sample::Sample;

//! Metric family descriptors.
//!
//! Descriptors are process-wide constants shared by every scrape.

/// Name, help text and label schema of one exported metric family.
///
/// All exported families are gauges.
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDesc {
    /// Fully qualified metric name.
    pub name: &'static str,
    /// `# HELP` text.
    pub help: &'static str,
    /// Label names, in the order sample label values are given.
    pub labels: &'static [&'static str],
}

/// Labels shared by the timestamp families.
const RELEASE_LABELS: &[&str] = &["product_name", "release_cycle_name"];

/// Presence record of a release cycle; value is always `1`.
pub static PRODUCT_INFO: MetricDesc = MetricDesc {
    name: "endoflife_product_info",
    help: "Information about the End-of-Life (EOL) status and details of a product.",
    labels: &[
        "is_eol",
        "is_lts",
        "is_maintained",
        "latest_version",
        "product_name",
        "release_cycle_name",
    ],
};

pub static LATEST_VERSION_TIMESTAMP: MetricDesc = MetricDesc {
    name: "endoflife_latest_version_timestamp_seconds",
    help: "Unix timestamp of the latest version release date for a product's release cycle.",
    labels: RELEASE_LABELS,
};

pub static RELEASE_CYCLE_TIMESTAMP: MetricDesc = MetricDesc {
    name: "endoflife_release_cycle_timestamp_seconds",
    help: "Unix timestamp of the release cycle's official release date.",
    labels: RELEASE_LABELS,
};

pub static EOL_FROM_TIMESTAMP: MetricDesc = MetricDesc {
    name: "endoflife_eol_from_timestamp_seconds",
    help: "Unix timestamp when a product's release cycle reaches its End-of-Life (EOL) or maintenance end.",
    labels: RELEASE_LABELS,
};

/// Every exported family, in exposition order.
pub static DESCRIPTORS: [&MetricDesc; 4] = [
    &PRODUCT_INFO,
    &LATEST_VERSION_TIMESTAMP,
    &RELEASE_CYCLE_TIMESTAMP,
    &EOL_FROM_TIMESTAMP,
];

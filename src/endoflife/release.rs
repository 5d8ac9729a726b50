//! Release records: upstream wire shapes and the canonical [`ReleaseDetails`].
//!
//! Upstream records are loosely typed (nullable booleans, optional dates, a
//! `latest` field that is sometimes an object and sometimes null). Everything
//! is funnelled through [`ReleaseDetails::from`], which always produces a fully
//! populated value, substituting sentinels where data is missing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Latest version name used when upstream provides none.
pub const NOT_AVAILABLE: &str = "N/A";

/// Unix timestamp of the EOL date assumed when none is announced (2050-01-01).
pub const NO_EOL_ANNOUNCED_SECS: i64 = 2_524_608_000;

/// Date format used by every date field of the upstream API.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sentinel for a missing or unparseable release / latest-version date.
///
/// This is the Unix epoch, so the exported timestamp reads as `0`.
pub fn unknown_date() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Sentinel for a release cycle with no announced EOL date.
///
/// A far-future date rather than the epoch, so that "no EOL date published"
/// never reads as "already past EOL".
pub fn no_eol_announced() -> DateTime<Utc> {
    DateTime::from_timestamp(NO_EOL_ANNOUNCED_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Parse an upstream `YYYY-MM-DD` date as midnight UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

// =============================================================================
// Wire types
// =============================================================================

/// A release cycle exactly as the upstream API returns it.
///
/// Only the fields the exporter uses are modelled; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRelease {
    /// Release cycle name (e.g. `"8.0"`).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_eol: Option<bool>,
    #[serde(default)]
    pub is_lts: Option<bool>,
    #[serde(default)]
    pub is_maintained: Option<bool>,
    /// EOL date, `YYYY-MM-DD`; null when not announced.
    #[serde(default)]
    pub eol_from: Option<String>,
    /// Release date of the cycle, `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Latest version object (`{"name": .., "date": ..}`), null, or absent.
    ///
    /// Kept untyped so that a structurally different payload degrades to the
    /// `"N/A"` sentinel instead of failing the whole response.
    #[serde(default)]
    pub latest: Option<serde_json::Value>,
}

/// The `latest` sub-object of a release cycle.
#[derive(Debug, Deserialize)]
struct RawLatestVersion {
    name: String,
    #[serde(default)]
    date: Option<String>,
}

/// Envelope of `GET /products/{product}/releases/{cycle}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseEnvelope {
    pub result: RawRelease,
}

/// Envelope of `GET /products/{product}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub result: ProductResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductResult {
    #[serde(default)]
    pub releases: Vec<RawRelease>,
}

// =============================================================================
// Canonical type
// =============================================================================

/// Normalized lifecycle data of a single release cycle.
///
/// Every field is always populated; see [`unknown_date`], [`no_eol_announced`]
/// and [`NOT_AVAILABLE`] for the sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDetails {
    pub release_cycle_name: String,
    pub is_eol: bool,
    pub is_lts: bool,
    pub is_maintained: bool,
    pub latest_version: String,
    pub latest_version_date: DateTime<Utc>,
    pub release_cycle_date: DateTime<Utc>,
    pub eol_from: DateTime<Utc>,
}

impl From<RawRelease> for ReleaseDetails {
    fn from(raw: RawRelease) -> Self {
        let release_cycle_name = raw.name.unwrap_or_default();

        let mut latest_version = NOT_AVAILABLE.to_string();
        let mut latest_version_date = unknown_date();
        if let Some(latest) = raw
            .latest
            .and_then(|value| serde_json::from_value::<RawLatestVersion>(value).ok())
        {
            // The name stands on its own even when the date is unusable.
            latest_version = latest.name;
            match latest.date.as_deref().and_then(parse_date) {
                Some(date) => latest_version_date = date,
                None => tracing::debug!(
                    release_cycle_name = %release_cycle_name,
                    date = ?latest.date,
                    "Unparseable latest version date"
                ),
            }
        }

        let eol_from = raw
            .eol_from
            .as_deref()
            .and_then(parse_date)
            .unwrap_or_else(no_eol_announced);

        let release_cycle_date = match raw.release_date.as_deref().and_then(parse_date) {
            Some(date) => date,
            None => {
                tracing::debug!(
                    release_cycle_name = %release_cycle_name,
                    date = ?raw.release_date,
                    "Unparseable release date"
                );
                unknown_date()
            }
        };

        Self {
            release_cycle_name,
            is_eol: raw.is_eol.unwrap_or(false),
            is_lts: raw.is_lts.unwrap_or(false),
            is_maintained: raw.is_maintained.unwrap_or(false),
            latest_version,
            latest_version_date,
            release_cycle_date,
            eol_from,
        }
    }
}

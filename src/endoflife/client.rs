//! HTTP client for the endoflife.date API.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::UpstreamError;
use super::release::{ProductEnvelope, ReleaseDetails, ReleaseEnvelope};

/// Public endoflife.date API root.
pub const DEFAULT_BASE_URL: &str = "https://endoflife.date/api/v1";

/// Default per-request timeout (10 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of release lifecycle data.
///
/// [`EndOfLifeClient`] is the production implementation; tests substitute
/// in-memory doubles. Callers bound each call with their own deadline by
/// racing (and dropping) the returned future.
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync + 'static {
    /// Fetch one release cycle.
    ///
    /// Endpoint: `GET /products/{product}/releases/{cycle}`
    async fn fetch_release(
        &self,
        product: &str,
        cycle: &str,
    ) -> Result<ReleaseDetails, UpstreamError>;

    /// Fetch every release cycle of a product.
    ///
    /// Endpoint: `GET /products/{product}`
    ///
    /// A malformed release entry fails the whole call with
    /// [`UpstreamError::Decode`]; results are never silently partial.
    async fn fetch_all_releases(&self, product: &str) -> Result<Vec<ReleaseDetails>, UpstreamError>;
}

/// endoflife.date API client.
///
/// Wraps a pooled `reqwest::Client`, so one instance should be shared by all
/// scrapes.
pub struct EndOfLifeClient {
    base_url: Url,
    client: Client,
}

impl EndOfLifeClient {
    /// Create a client for `base_url` with the given per-request timeout.
    ///
    /// # Errors
    /// Returns `UpstreamError::InvalidUrl` if `base_url` cannot carry path
    /// segments, or `UpstreamError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(base_url, client)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, UpstreamError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("'{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(format!(
                "'{}' cannot be used as a base url",
                base_url
            )));
        }

        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, UpstreamError> {
        tracing::debug!(url = %url, "Requesting upstream");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl std::fmt::Debug for EndOfLifeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndOfLifeClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl ReleaseSource for EndOfLifeClient {
    async fn fetch_release(
        &self,
        product: &str,
        cycle: &str,
    ) -> Result<ReleaseDetails, UpstreamError> {
        let url = self.endpoint(["products", product, "releases", cycle])?;
        let envelope: ReleaseEnvelope = self.get_json(url).await?;
        Ok(ReleaseDetails::from(envelope.result))
    }

    async fn fetch_all_releases(&self, product: &str) -> Result<Vec<ReleaseDetails>, UpstreamError> {
        let url = self.endpoint(["products", product])?;
        let envelope: ProductEnvelope = self.get_json(url).await?;
        Ok(envelope
            .result
            .releases
            .into_iter()
            .map(ReleaseDetails::from)
            .collect())
    }
}

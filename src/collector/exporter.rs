//! Scrape-time collector turning upstream release data into samples.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout_at;

use crate::config::{AppConfig, DEFAULT_SCRAPE_TIMEOUT, ProductConfig, ReleaseSelection};
use crate::endoflife::{EndOfLifeClient, ReleaseDetails, ReleaseSource, UpstreamError};
use crate::metrics::{
    DESCRIPTORS, EOL_FROM_TIMESTAMP, LATEST_VERSION_TIMESTAMP, MetricDesc, PRODUCT_INFO,
    RELEASE_CYCLE_TIMESTAMP, Sample, render_prometheus,
};

/// Release cycles obtained for one product.
struct ProductReleases {
    releases: Vec<ReleaseDetails>,
    /// The scrape deadline expired while fetching this product.
    deadline_exceeded: bool,
}

/// Collects release lifecycle samples for the configured products.
///
/// Each call to [`collect`](Self::collect) is one scrape: products are
/// fetched sequentially, in configuration order, under a single deadline.
///
/// # Error Handling
///
/// Failures never abort a scrape. A failed product (all-releases mode) or
/// release cycle is logged and skipped; everything else is still exported.
/// When the deadline expires the in-flight request is cancelled and the
/// remaining units are omitted.
pub struct Exporter {
    products: Vec<ProductConfig>,
    source: Arc<dyn ReleaseSource>,
    scrape_timeout: Duration,
}

impl Exporter {
    /// Create an exporter over `products` backed by `source`.
    pub fn new(products: Vec<ProductConfig>, source: Arc<dyn ReleaseSource>) -> Self {
        Self {
            products,
            source,
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT,
        }
    }

    /// Build an exporter talking to the upstream API described by `config`.
    ///
    /// # Errors
    /// Returns `UpstreamError` if the HTTP client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let client = EndOfLifeClient::new(
            &config.upstream.base_url,
            config.upstream.request_timeout,
        )?;

        Ok(Self::new(config.products.clone(), Arc::new(client))
            .with_scrape_timeout(config.upstream.scrape_timeout))
    }

    /// Set the deadline for one whole scrape.
    pub fn with_scrape_timeout(mut self, scrape_timeout: Duration) -> Self {
        self.scrape_timeout = scrape_timeout;
        self
    }

    /// Configured products, in scrape order.
    pub fn products(&self) -> &[ProductConfig] {
        &self.products
    }

    /// Metric families this exporter produces.
    pub fn describe(&self) -> &'static [&'static MetricDesc] {
        &DESCRIPTORS
    }

    /// Run one scrape and return every sample obtained.
    pub async fn collect(&self) -> Vec<Sample> {
        let started = Instant::now();
        let deadline = tokio::time::Instant::now() + self.scrape_timeout;
        let mut samples = Vec::new();
        // Series keys already emitted; "latest" may resolve to a listed cycle.
        let mut emitted: HashSet<(String, String)> = HashSet::new();

        for product in &self.products {
            let fetched = self.fetch_product(product, deadline).await;

            for release in &fetched.releases {
                let key = (product.name.clone(), release.release_cycle_name.clone());
                if !emitted.insert(key) {
                    tracing::warn!(
                        product_name = %product.name,
                        release_cycle_name = %release.release_cycle_name,
                        "Duplicate release cycle, skipping"
                    );
                    continue;
                }
                samples.extend(release_samples(&product.name, release));
            }

            if fetched.deadline_exceeded {
                tracing::warn!(
                    product_name = %product.name,
                    timeout_ms = self.scrape_timeout.as_millis(),
                    "Scrape deadline exceeded, skipping remaining products"
                );
                break;
            }
        }

        tracing::debug!(
            products = self.products.len(),
            samples = samples.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Scrape complete"
        );
        samples
    }

    /// Run one scrape and render it in Prometheus text format.
    pub async fn render(&self) -> String {
        let samples = self.collect().await;
        render_prometheus(self.describe(), &samples)
    }

    async fn fetch_product(
        &self,
        product: &ProductConfig,
        deadline: tokio::time::Instant,
    ) -> ProductReleases {
        match product.selection() {
            ReleaseSelection::All => {
                match timeout_at(deadline, self.source.fetch_all_releases(&product.name)).await {
                    Ok(Ok(releases)) => ProductReleases {
                        releases,
                        deadline_exceeded: false,
                    },
                    Ok(Err(e)) => {
                        tracing::error!(
                            product_name = %product.name,
                            error = %e,
                            "Failed to get all release cycles"
                        );
                        ProductReleases {
                            releases: Vec::new(),
                            deadline_exceeded: false,
                        }
                    }
                    Err(_) => ProductReleases {
                        releases: Vec::new(),
                        deadline_exceeded: true,
                    },
                }
            }
            ReleaseSelection::Cycles(cycles) => {
                let mut releases = Vec::with_capacity(cycles.len());

                for cycle in &cycles {
                    match timeout_at(deadline, self.source.fetch_release(&product.name, cycle))
                        .await
                    {
                        Ok(Ok(release)) => releases.push(release),
                        Ok(Err(e)) => {
                            tracing::error!(
                                product_name = %product.name,
                                release_name = %cycle,
                                error = %e,
                                "Failed to get release cycle"
                            );
                        }
                        Err(_) => {
                            return ProductReleases {
                                releases,
                                deadline_exceeded: true,
                            };
                        }
                    }
                }

                ProductReleases {
                    releases,
                    deadline_exceeded: false,
                }
            }
        }
    }
}

impl std::fmt::Debug for Exporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exporter")
            .field("products", &self.products)
            .field("scrape_timeout", &self.scrape_timeout)
            .finish_non_exhaustive()
    }
}

/// The four samples exported for one release cycle of `product_name`.
pub fn release_samples(product_name: &str, release: &ReleaseDetails) -> [Sample; 4] {
    let cycle = release.release_cycle_name.as_str();

    [
        Sample::new(
            &PRODUCT_INFO,
            [
                bool_label(release.is_eol),
                bool_label(release.is_lts),
                bool_label(release.is_maintained),
                release.latest_version.as_str(),
                product_name,
                cycle,
            ],
            1.0,
        ),
        Sample::new(
            &LATEST_VERSION_TIMESTAMP,
            [product_name, cycle],
            release.latest_version_date.timestamp() as f64,
        ),
        Sample::new(
            &RELEASE_CYCLE_TIMESTAMP,
            [product_name, cycle],
            release.release_cycle_date.timestamp() as f64,
        ),
        Sample::new(
            &EOL_FROM_TIMESTAMP,
            [product_name, cycle],
            release.eol_from.timestamp() as f64,
        ),
    ]
}

fn bool_label(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

//! Product selection configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Release cycle fetched when a product lists none.
pub const DEFAULT_RELEASE: &str = "latest";

/// Which release cycles of a product a scrape fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseSelection {
    /// Every cycle upstream knows about (`GET /products/{name}`).
    All,
    /// The listed cycles, in order (`GET /products/{name}/releases/{cycle}`).
    Cycles(Vec<String>),
}

/// A product to export, as written in the config file.
///
/// ```yaml
/// - name: mongo
///   releases: ["8.0", "7.0"]
/// - name: ubuntu
///   all_releases: true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Product identifier on endoflife.date (e.g. `"mongo"`).
    pub name: String,
    /// Export every release cycle; `releases` is ignored when set.
    #[serde(default)]
    pub all_releases: bool,
    /// Release cycle identifiers (default: `["latest"]`).
    #[serde(default)]
    pub releases: Vec<String>,
}

impl ProductConfig {
    /// Create a product selecting only the `latest` release cycle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            all_releases: false,
            releases: Vec::new(),
        }
    }

    /// Set the release cycles to fetch.
    pub fn with_releases<I, S>(mut self, releases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.releases = releases.into_iter().map(Into::into).collect();
        self
    }

    /// Set all-releases mode.
    pub fn with_all_releases(mut self, all_releases: bool) -> Self {
        self.all_releases = all_releases;
        self
    }

    /// Effective release selection.
    ///
    /// Applies the `["latest"]` default even if [`apply_defaults`] was never
    /// called.
    ///
    /// [`apply_defaults`]: Self::apply_defaults
    pub fn selection(&self) -> ReleaseSelection {
        if self.all_releases {
            ReleaseSelection::All
        } else if self.releases.is_empty() {
            ReleaseSelection::Cycles(vec![DEFAULT_RELEASE.to_string()])
        } else {
            ReleaseSelection::Cycles(self.releases.clone())
        }
    }

    /// Fill in the default release list and report ignored settings.
    pub fn apply_defaults(&mut self) {
        if self.all_releases && !self.releases.is_empty() {
            tracing::warn!(
                product_name = %self.name,
                "Ignoring 'releases' field when 'all_releases' is true"
            );
        }

        if !self.all_releases && self.releases.is_empty() {
            self.releases = vec![DEFAULT_RELEASE.to_string()];
        }
    }

    /// Validate a single product entry.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("product name cannot be empty".to_string());
        }
        if self.releases.iter().any(|r| r.trim().is_empty()) {
            return Err(format!(
                "product '{}': release identifiers cannot be empty",
                self.name
            ));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.releases.iter().find(|r| !seen.insert(r.as_str())) {
            return Err(format!(
                "product '{}': duplicate release identifier '{}'",
                self.name, duplicate
            ));
        }
        Ok(())
    }
}

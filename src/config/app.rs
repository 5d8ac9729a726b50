//! Application configuration structures.

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::endoflife::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

use super::product::ProductConfig;
use super::validation::ConfigError;

// =============================================================================
// Constants
// =============================================================================

/// Default deadline for one complete scrape (10 seconds).
pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_scrape_timeout() -> Duration {
    DEFAULT_SCRAPE_TIMEOUT
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Exposition server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address (default: "0.0.0.0").
    pub bind: String,

    /// Server port (default: 8080).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// =============================================================================
// Upstream Configuration
// =============================================================================

/// endoflife.date API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API root (default: `https://endoflife.date/api/v1`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout of a single upstream request (default: 10s).
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Deadline for a whole scrape across all products (default: 10s).
    #[serde(default = "default_scrape_timeout", with = "humantime_serde")]
    pub scrape_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT,
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exposition server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream API configuration.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Products to export, in scrape order.
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text, apply defaults and validate.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Fill in per-product defaults.
    pub fn apply_defaults(&mut self) {
        for product in &mut self.products {
            product.apply_defaults();
        }
    }

    /// Socket address the exposition server listens on.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if `server.bind` is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.bind.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "invalid server bind address: '{}'",
                self.server.bind
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate server bind address
        self.socket_addr()?;

        // Validate server port
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server port must be non-zero".to_string(),
            ));
        }

        // Validate upstream
        let base_url = url::Url::parse(&self.upstream.base_url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "invalid upstream base_url '{}': {}",
                self.upstream.base_url, e
            ))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "upstream base_url '{}' must use http or https",
                self.upstream.base_url
            )));
        }
        if self.upstream.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "upstream request_timeout must be positive".to_string(),
            ));
        }
        if self.upstream.scrape_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "upstream scrape_timeout must be positive".to_string(),
            ));
        }

        // Validate products
        if self.products.is_empty() {
            return Err(ConfigError::ValidationError(
                "no products defined in the configuration".to_string(),
            ));
        }

        let mut seen_names = HashSet::new();
        for product in &self.products {
            product.validate().map_err(ConfigError::ValidationError)?;
            if !seen_names.insert(product.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate product name: '{}'",
                    product.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            products: vec![ProductConfig::new("mongo").with_releases(["8.0"])],
        }
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_upstream_config_default() {
        let config = UpstreamConfig::default();
        assert_eq!(config.base_url, "https://endoflife.date/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.scrape_timeout, DEFAULT_SCRAPE_TIMEOUT);
    }

    #[test]
    fn test_load_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"---
products:
  - name: mongo
    releases:
      - "8.0"
      - "7.0"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.products.len(), 1);
        assert_eq!(config.products[0].name, "mongo");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_missing_file() {
        let result = AppConfig::load("/nonexistent/endoflife/config.yml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_from_yaml_full() {
        let config = AppConfig::from_yaml(
            r#"
server:
  bind: 127.0.0.1
  port: 9100
upstream:
  base_url: http://localhost:3000/api/v1
  request_timeout: 2s
  scrape_timeout: 30s
products:
  - name: ubuntu
    all_releases: true
"#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.upstream.base_url, "http://localhost:3000/api/v1");
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(2));
        assert_eq!(config.upstream.scrape_timeout, Duration::from_secs(30));
        assert!(config.products[0].all_releases);
    }

    #[test]
    fn test_from_yaml_defaults_latest_release() {
        let config = AppConfig::from_yaml(
            r#"
products:
  - name: mongo
    releases:
      - "8.0"
      - "7.0"
  - name: redis
"#,
        )
        .unwrap();

        assert_eq!(config.products[0].releases.len(), 2);
        assert_eq!(config.products[1].releases, vec!["latest".to_string()]);
    }

    #[test]
    fn test_from_yaml_all_releases_keeps_list_untouched() {
        let config = AppConfig::from_yaml(
            r#"
products:
  - name: ubuntu
    all_releases: true
    releases: ["22.04"]
"#,
        )
        .unwrap();

        assert!(config.products[0].all_releases);
        assert_eq!(config.products[0].releases, vec!["22.04".to_string()]);
    }

    #[test]
    fn test_from_yaml_empty_products() {
        let result = AppConfig::from_yaml("products: []\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no products"));

        assert!(AppConfig::from_yaml("products:\n").is_err());
        assert!(AppConfig::from_yaml("server:\n  port: 8080\n").is_err());
    }

    #[test]
    fn test_config_validation_valid() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_bind_address() {
        let mut config = valid_config();
        config.server.bind = "not-an-ip".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("invalid server bind address")
        );
    }

    #[test]
    fn test_config_validation_invalid_base_url() {
        let mut config = valid_config();
        config.upstream.base_url = "endoflife.date".to_string();
        assert!(config.validate().is_err());

        config.upstream.base_url = "ftp://endoflife.date/api".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must use http or https"));
    }

    #[test]
    fn test_config_validation_zero_timeouts() {
        let mut config = valid_config();
        config.upstream.scrape_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.upstream.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_duplicate_products() {
        let mut config = valid_config();
        config.products.push(ProductConfig::new("mongo"));

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_config_validation_empty_product_name() {
        let mut config = valid_config();
        config.products.push(ProductConfig::new(""));

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_from_yaml_duplicate_releases() {
        let result = AppConfig::from_yaml(
            r#"
products:
  - name: mongo
    releases: ["8.0", "8.0", "latest"]
"#,
        );

        match result {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("duplicate release identifier '8.0'"), "{msg}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_validation_ipv6_bind_address() {
        let mut config = valid_config();
        config.server.bind = "::".to_string();
        assert!(config.validate().is_ok());
        assert!(config.socket_addr().unwrap().is_ipv6());
    }
}

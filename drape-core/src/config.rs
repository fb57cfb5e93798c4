//! Centralized configuration for Drape.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::DrapeError;
use crate::product::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Central configuration for all Drape components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct DrapeConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub catalog: CatalogConfig,
}

/// Search API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Origins allowed to call the JSON API from a browser
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["http://localhost:5173".to_string()],
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Search client configuration.
///
/// Controls where search requests are sent and how many products are
/// requested per page.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the search endpoint
    pub endpoint: String,
    /// Products requested per page
    pub page_size: u32,
    /// Request timeout (None = rely on the HTTP stack)
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/search".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Parses the configured endpoint.
    ///
    /// # Errors
    /// - `DrapeError::InvalidEndpoint` - Endpoint is not an absolute http(s) URL
    pub fn endpoint_url(&self) -> crate::Result<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| DrapeError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DrapeError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

/// Product catalog and ranking configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON file holding the product catalog
    pub path: PathBuf,
    /// Matches below this cosine similarity are dropped
    pub min_similarity: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dataset/catalog.json"),
            min_similarity: 0.01,
        }
    }
}

impl DrapeConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("DRAPE_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("DRAPE_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        if let Ok(origins) = std::env::var("DRAPE_ALLOWED_ORIGINS") {
            config.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(endpoint) = std::env::var("DRAPE_ENDPOINT") {
            config.client.endpoint = endpoint;
        }

        if let Ok(page_size) = std::env::var("DRAPE_PAGE_SIZE") {
            if let Some(size) = parse_page_size(&page_size) {
                config.client.page_size = size;
            }
        }

        if let Ok(timeout) = std::env::var("DRAPE_REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.client.request_timeout = Some(Duration::from_secs(seconds));
            }
        }

        if let Ok(path) = std::env::var("DRAPE_CATALOG") {
            config.catalog.path = PathBuf::from(path);
        }

        if let Ok(threshold) = std::env::var("DRAPE_MIN_SIMILARITY") {
            if let Ok(value) = threshold.parse::<f64>() {
                config.catalog.min_similarity = value.clamp(0.0, 1.0);
            }
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Binds an ephemeral loopback port and uses a short request timeout.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                ..Default::default()
            },
            client: ClientConfig {
                request_timeout: Some(Duration::from_secs(5)),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Parses a page size override, capping it at [`MAX_PAGE_SIZE`].
///
/// Zero and unparsable values are ignored.
fn parse_page_size(value: &str) -> Option<u32> {
    let size = value.trim().parse::<u32>().ok()?;
    if size == 0 {
        return None;
    }
    if size > MAX_PAGE_SIZE {
        tracing::warn!("DRAPE_PAGE_SIZE={size} exceeds {MAX_PAGE_SIZE}, using {MAX_PAGE_SIZE}");
    }
    Some(size.min(MAX_PAGE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = DrapeConfig::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.client.page_size, 5);
        assert_eq!(config.client.request_timeout, None);
        assert_eq!(config.catalog.min_similarity, 0.01);
    }

    #[test]
    fn test_endpoint_parsing() {
        let config = ClientConfig::default();
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.path(), "/search");
        assert_eq!(url.port(), Some(8000));

        let bad = ClientConfig {
            endpoint: "ftp://example.com/search".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad.endpoint_url(),
            Err(DrapeError::InvalidEndpoint { .. })
        ));

        let garbage = ClientConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(garbage.endpoint_url().is_err());
    }

    #[test]
    fn test_testing_preset() {
        let config = DrapeConfig::for_testing();
        assert_eq!(config.server.bind_address(), "127.0.0.1:0");
        assert_eq!(config.client.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_page_size_override_stays_servable() {
        assert_eq!(parse_page_size("12"), Some(12));
        assert_eq!(parse_page_size("100"), Some(MAX_PAGE_SIZE));
        assert_eq!(parse_page_size("150"), Some(MAX_PAGE_SIZE));
        assert_eq!(parse_page_size("0"), None);
        assert_eq!(parse_page_size("-3"), None);
        assert_eq!(parse_page_size("many"), None);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("DRAPE_PORT", "9100");
            std::env::set_var("DRAPE_PAGE_SIZE", "12");
            std::env::set_var("DRAPE_REQUEST_TIMEOUT", "30");
            std::env::set_var("DRAPE_MIN_SIMILARITY", "2.5");
            std::env::set_var("DRAPE_ALLOWED_ORIGINS", "http://a.test, ,http://b.test");
        }

        let config = DrapeConfig::from_env();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.client.page_size, 12);
        assert_eq!(config.client.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.catalog.min_similarity, 1.0);
        assert_eq!(
            config.server.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );

        // Cleanup
        unsafe {
            std::env::remove_var("DRAPE_PORT");
            std::env::remove_var("DRAPE_PAGE_SIZE");
            std::env::remove_var("DRAPE_REQUEST_TIMEOUT");
            std::env::remove_var("DRAPE_MIN_SIMILARITY");
            std::env::remove_var("DRAPE_ALLOWED_ORIGINS");
        }
    }
}

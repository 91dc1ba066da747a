//! # Configuration
//!
//! Server settings plus per-collection endpoint settings. Loaded once at
//! startup from a JSON file and read-only afterwards; every request to a
//! collection shares the same `EndpointConfig`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// API prefix all collection routers nest under (default: "/api/v1")
    #[serde(default = "default_base")]
    pub base: String,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Collections exposed by this server
    #[serde(default)]
    pub collections: Vec<EndpointConfig>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base() -> String {
    "/api/v1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base: default_base(),
            cors_origins: Vec::new(),
            collections: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Socket address string for binding
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-collection endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// The collection's own name
    pub collection: String,

    /// Whether the endpoint is exposed at all (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Path segment override; the collection name is used when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Allow-listed filter names callers may apply from the query string
    #[serde(default)]
    pub safe_filters: Vec<String>,

    /// Hard cap on page size (default: 50)
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_max_per_page() -> usize {
    50
}

impl EndpointConfig {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            enabled: true,
            name: None,
            safe_filters: Vec::new(),
            max_per_page: default_max_per_page(),
        }
    }

    pub fn with_safe_filters(mut self, filters: &[&str]) -> Self {
        self.safe_filters = filters.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_max_per_page(mut self, max: usize) -> Self {
        self.max_per_page = max;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// The API path segment for this collection.
    pub fn route_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.collection)
    }

    /// Is this filter name allow-listed for external callers?
    pub fn is_safe_filter(&self, name: &str) -> bool {
        self.safe_filters.iter().any(|f| f == name)
    }
}

//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default GIPHY API endpoint.
pub const DEFAULT_GIPHY_BASE_URL: &str = "https://api.giphy.com";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// GIPHY API client configuration.
    pub giphy: GiphyConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// GIPHY API key used by the `searchGif` tool.
    /// Get a key at: https://developers.giphy.com/dashboard/
    pub giphy_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "giphy_api_key",
                &self.giphy_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CredentialsConfig {
    /// Build credentials from an optional raw key. An empty key counts as unset.
    pub fn with_giphy_api_key(key: Option<String>) -> Self {
        Self {
            giphy_api_key: key.filter(|k| !k.is_empty()),
        }
    }
}

/// GIPHY API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiphyConfig {
    /// Base URL of the GIPHY API (overridable for testing or proxies).
    pub base_url: String,
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GIPHY_BASE_URL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "Authless Calculator".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            giphy: GiphyConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_` (e.g. `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`). The GIPHY key is read from `GIPHY_API_KEY`, falling
    /// back to `MCP_GIPHY_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        let api_key = std::env::var("GIPHY_API_KEY")
            .or_else(|_| std::env::var("MCP_GIPHY_API_KEY"))
            .ok();
        config.credentials = CredentialsConfig::with_giphy_api_key(api_key);
        if config.credentials.giphy_api_key.is_some() {
            info!("GIPHY API key loaded from environment");
        } else {
            warn!("GIPHY_API_KEY not set - searchGif will not be able to query GIPHY");
        }

        if let Ok(base_url) = std::env::var("MCP_GIPHY_BASE_URL") {
            config.giphy.base_url = base_url;
        }

        config
    }

    /// Check the configuration for values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::config("server name must not be empty"));
        }

        let base_url = self.giphy.base_url.as_str();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "GIPHY base URL must be http(s), got '{}'",
                base_url
            )));
        }

        Ok(())
    }
}

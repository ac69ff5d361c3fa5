//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport.
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport serving the SSE stream and the direct JSON-RPC endpoint.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "http" | "" => {
                let port = std::env::var("MCP_HTTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080);
                let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
                let enable_cors = std::env::var("MCP_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or(true);
                Self::Http(HttpConfig {
                    port,
                    host,
                    enable_cors,
                })
            }
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{} (/sse, /mcp)", cfg.host, cfg.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "http")]
    #[test]
    fn test_default_is_http() {
        match TransportConfig::default() {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, 8080);
                assert_eq!(cfg.host, "127.0.0.1");
                assert!(cfg.enable_cors);
            }
            #[allow(unreachable_patterns)]
            _ => panic!("Expected HTTP transport"),
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_description() {
        let config = TransportConfig::http(9000, "0.0.0.0");
        assert_eq!(config.description(), "HTTP on 0.0.0.0:9000 (/sse, /mcp)");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_config_deserializes_with_defaults() {
        let config: TransportConfig =
            serde_json::from_str(r#"{"type": "http", "port": 3000}"#).unwrap();
        match config {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.port, 3000);
                assert_eq!(cfg.host, "127.0.0.1");
            }
            #[allow(unreachable_patterns)]
            _ => panic!("Expected HTTP transport"),
        }
    }
}

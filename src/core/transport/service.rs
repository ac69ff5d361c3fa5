//! Transport service - orchestrates different transport types.

use tracing::info;

use super::TransportConfig;
use crate::core::{McpServer, Result};

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Start the transport with the given MCP server.
    ///
    /// This method blocks until the transport is shut down. Transport
    /// failures surface as [`crate::core::Error::Transport`].
    pub async fn run(self, server: McpServer) -> Result<()> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await?,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server).await?,
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;
    use crate::core::{Config, Error};
    use crate::core::transport::TransportError;

    #[tokio::test]
    async fn test_bind_failure_is_transport_error() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let service = TransportService::new(TransportConfig::http(port, "127.0.0.1"));
        let err = service.run(McpServer::new(Config::default())).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Bind { .. })
        ));
    }
}

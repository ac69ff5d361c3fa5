//! STDIO transport implementation.
//!
//! Serves the tools over stdin/stdout through rmcp, for MCP clients that
//! spawn the server as a subprocess.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::StdioInit(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::StdioSession(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}

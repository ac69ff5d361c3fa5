//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (schema generated with schemars)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for the HTTP transports)
//! - `create_route()` method (rmcp route for the STDIO transport)
//!
//! Both tables are built once here and are read-only afterwards.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// Instructions sent to clients during initialization.
pub const SERVER_INSTRUCTIONS: &str = "Calculator and GIF search server. \
     Use `add` or `calculate` for arithmetic and `searchGif` to fetch a GIF from GIPHY.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and is cheap to
/// clone: every clone shares the same configuration and tool tables.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool table used by the HTTP transports.
    registry: Arc<ToolRegistry>,

    /// Tool router used by rmcp-driven transports.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            registry: Arc::new(ToolRegistry::new(&config)),
            tool_router: build_tool_router::<Self>(&config),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.tool_names()
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for the HTTP transports).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for the HTTP transports).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_identity() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "Authless Calculator");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_list_tools_has_schemas() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        assert_eq!(tools.len(), 3);
        for tool in &tools {
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let info = McpServer::new(Config::default()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[tokio::test]
    async fn test_call_tool_through_server() {
        let server = McpServer::new(Config::default());
        let value = server
            .call_tool(
                "calculate",
                serde_json::json!({ "operation": "multiply", "a": 6, "b": 7 }),
            )
            .await
            .unwrap();
        assert_eq!(value["content"][0]["text"], "42");
    }
}

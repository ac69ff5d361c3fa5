//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The read-only table of available tools, built once at start-up
//! - Dispatch for tool calls coming from the HTTP transports

use tracing::{info, warn};

use crate::core::config::Config;

use super::ToolError;
use super::definitions::{AddTool, CalculateTool, SearchGifTool};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns the tool instances used by the HTTP transports.
///
/// The registry is immutable after construction and safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct ToolRegistry {
    search_gif: SearchGifTool,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: &Config) -> Self {
        Self {
            search_gif: SearchGifTool::from_config(config),
        }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![AddTool::NAME, CalculateTool::NAME, SearchGifTool::NAME]
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Returns the serialized `CallToolResult`. Only unknown tools and
    /// arguments that do not match the tool's schema produce an error.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        info!("Dispatching tool call: {}", name);
        match name {
            AddTool::NAME => AddTool::http_handler(arguments),
            CalculateTool::NAME => CalculateTool::http_handler(arguments),
            SearchGifTool::NAME => self.search_gif.http_handler(arguments).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> ToolRegistry {
        ToolRegistry::new(&Config::default())
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names, vec!["add", "calculate", "searchGif"]);
    }

    #[tokio::test]
    async fn test_registry_call_add() {
        let result = test_registry()
            .call_tool("add", serde_json::json!({ "a": 1, "b": 2 }))
            .await;
        let value = tokio_test::assert_ok!(result);
        assert_eq!(value["content"][0]["text"], "3");
    }

    #[tokio::test]
    async fn test_registry_call_search_without_key() {
        let value = test_registry()
            .call_tool("searchGif", serde_json::json!({ "query": "cat" }))
            .await
            .unwrap();
        assert_eq!(
            value["content"][0]["text"],
            "Error: GIPHY_API_KEY environment variable is not set"
        );
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let result = test_registry()
            .call_tool("unknown", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_registry_call_invalid_arguments() {
        let result = test_registry()
            .call_tool("calculate", serde_json::json!({ "operation": "add", "a": 1 }))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}

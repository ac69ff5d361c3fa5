//! Addition tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use super::format_number;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    parse_http_args, parse_route_args, text_result, to_http_value,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First addend.
    pub a: f64,

    /// Second addend.
    pub b: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add tool - returns the sum of two numbers.
pub struct AddTool;

impl AddTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "add";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add two numbers and return the sum.";

    /// Execute the tool logic.
    pub fn execute(params: &AddParams) -> CallToolResult {
        debug!("add({}, {})", params.a, params.b);
        text_result(format_number(params.a + params.b))
    }

    /// HTTP handler for this tool (for the HTTP transports).
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: AddParams = parse_http_args(arguments)?;
        to_http_value(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AddParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            async move {
                let params: AddParams = parse_route_args(args)?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::first_text;

    fn add(a: f64, b: f64) -> String {
        first_text(&AddTool::execute(&AddParams { a, b })).to_string()
    }

    #[test]
    fn test_add_integers() {
        assert_eq!(add(2.0, 3.0), "5");
        assert_eq!(add(-7.0, 7.0), "0");
    }

    #[test]
    fn test_add_fractions() {
        assert_eq!(add(0.1, 0.2), "0.30000000000000004");
        assert_eq!(add(1.5, -0.25), "1.25");
    }

    #[test]
    fn test_add_overflow_propagates() {
        assert_eq!(add(f64::MAX, f64::MAX), "Infinity");
    }

    #[test]
    fn test_http_handler() {
        let value = AddTool::http_handler(serde_json::json!({ "a": 40, "b": 2 })).unwrap();
        assert_eq!(value["content"][0]["text"], "42");
        assert_eq!(value["content"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_http_handler_rejects_missing_argument() {
        let result = AddTool::http_handler(serde_json::json!({ "a": 1 }));
        tokio_test::assert_err!(result);
    }

    #[test]
    fn test_schema_lists_both_numbers() {
        let tool = AddTool::to_tool();
        let properties = tool.input_schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("a"));
        assert!(properties.contains_key("b"));
        assert_eq!(properties["a"]["type"], "number");
    }
}

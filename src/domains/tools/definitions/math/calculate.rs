//! Calculator tool definition.
//!
//! Applies one of four arithmetic operations to two numbers. Division by an
//! exact zero is answered with an error message instead of a result; every
//! other edge case follows IEEE-754 semantics.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, warn};

use super::format_number;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    parse_http_args, parse_route_args, text_result, to_http_value,
};

/// Message returned when dividing by zero.
pub const DIVIDE_BY_ZERO_MESSAGE: &str = "Error: Cannot divide by zero";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Parameters for the calculate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateParams {
    /// Operation to apply.
    #[schemars(description = "One of: add, subtract, multiply, divide")]
    pub operation: Operation,

    /// Left operand.
    pub a: f64,

    /// Right operand.
    pub b: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculate tool - add, subtract, multiply or divide two numbers.
pub struct CalculateTool;

impl CalculateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "calculate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Perform a basic arithmetic operation (add, subtract, multiply, divide) on two numbers.";

    /// Apply the operation, or `None` when dividing by zero.
    pub fn compute(operation: Operation, a: f64, b: f64) -> Option<f64> {
        match operation {
            Operation::Add => Some(a + b),
            Operation::Subtract => Some(a - b),
            Operation::Multiply => Some(a * b),
            Operation::Divide if b == 0.0 => None,
            Operation::Divide => Some(a / b),
        }
    }

    /// Execute the tool logic.
    pub fn execute(params: &CalculateParams) -> CallToolResult {
        debug!("calculate({:?}, {}, {})", params.operation, params.a, params.b);

        match Self::compute(params.operation, params.a, params.b) {
            Some(result) => text_result(format_number(result)),
            None => {
                warn!("Division by zero requested (a = {})", params.a);
                text_result(DIVIDE_BY_ZERO_MESSAGE)
            }
        }
    }

    /// HTTP handler for this tool (for the HTTP transports).
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: CalculateParams = parse_http_args(arguments)?;
        to_http_value(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CalculateParams>(),
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
                let params: CalculateParams = parse_route_args(args)?;
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

    fn calc(operation: Operation, a: f64, b: f64) -> String {
        let params = CalculateParams { operation, a, b };
        first_text(&CalculateTool::execute(&params)).to_string()
    }

    #[test]
    fn test_basic_operations() {
        assert_eq!(calc(Operation::Add, 2.0, 3.0), "5");
        assert_eq!(calc(Operation::Subtract, 2.0, 3.0), "-1");
        assert_eq!(calc(Operation::Multiply, 4.0, 2.5), "10");
        assert_eq!(calc(Operation::Divide, 7.0, 2.0), "3.5");
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(calc(Operation::Divide, 5.0, 0.0), DIVIDE_BY_ZERO_MESSAGE);
        assert_eq!(calc(Operation::Divide, 0.0, 0.0), DIVIDE_BY_ZERO_MESSAGE);
        assert_eq!(calc(Operation::Divide, 1.0, -0.0), DIVIDE_BY_ZERO_MESSAGE);
    }

    #[test]
    fn test_divide_by_zero_is_not_a_protocol_error() {
        let params = CalculateParams {
            operation: Operation::Divide,
            a: 1.0,
            b: 0.0,
        };
        let result = CalculateTool::execute(&params);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_non_terminating_division() {
        assert_eq!(calc(Operation::Divide, 1.0, 3.0), "0.3333333333333333");
    }

    #[test]
    fn test_overflow_propagates_as_infinity() {
        assert_eq!(calc(Operation::Multiply, 1e308, 10.0), "Infinity");
        assert_eq!(calc(Operation::Subtract, -f64::MAX, f64::MAX), "-Infinity");
    }

    #[test]
    fn test_compute() {
        assert_eq!(CalculateTool::compute(Operation::Divide, 1.0, 0.0), None);
        assert_eq!(CalculateTool::compute(Operation::Divide, 9.0, 3.0), Some(3.0));
    }

    #[test]
    fn test_params_operation_is_lowercase() {
        let params: CalculateParams =
            serde_json::from_str(r#"{"operation": "multiply", "a": 2, "b": 3}"#).unwrap();
        assert_eq!(params.operation, Operation::Multiply);

        let bad = serde_json::from_str::<CalculateParams>(r#"{"operation": "Modulo", "a": 2, "b": 3}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_http_handler() {
        let value = CalculateTool::http_handler(
            serde_json::json!({ "operation": "divide", "a": 10, "b": 0 }),
        )
        .unwrap();
        assert_eq!(value["content"][0]["text"], DIVIDE_BY_ZERO_MESSAGE);

        let value = CalculateTool::http_handler(
            serde_json::json!({ "operation": "subtract", "a": 10, "b": 4 }),
        )
        .unwrap();
        assert_eq!(value["content"][0]["text"], "6");
    }

    #[test]
    fn test_http_handler_rejects_unknown_operation() {
        let result =
            CalculateTool::http_handler(serde_json::json!({ "operation": "pow", "a": 2, "b": 3 }));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}

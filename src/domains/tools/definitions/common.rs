//! Helpers shared by all tool definitions.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::de::DeserializeOwned;

use crate::domains::tools::ToolError;

/// Create a successful result carrying a single text item.
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Deserialize rmcp call arguments into a tool's params struct.
pub fn parse_route_args<P: DeserializeOwned>(args: Option<JsonObject>) -> Result<P, McpError> {
    let args = args.unwrap_or_default();
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Deserialize HTTP JSON-RPC arguments into a tool's params struct.
pub fn parse_http_args<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Serialize a tool result for the HTTP transports.
pub fn to_http_value(result: &CallToolResult) -> Result<serde_json::Value, ToolError> {
    serde_json::to_value(result).map_err(|e| ToolError::internal(e.to_string()))
}

#[cfg(test)]
pub(crate) fn first_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        a: f64,
        b: f64,
    }

    #[test]
    fn test_text_result_is_success() {
        let result = text_result("hello");
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
        assert_eq!(first_text(&result), "hello");
    }

    #[test]
    fn test_parse_http_args_accepts_integers() {
        let pair: Pair = parse_http_args(serde_json::json!({ "a": 1, "b": 2.5 })).unwrap();
        assert_eq!(pair.a, 1.0);
        assert_eq!(pair.b, 2.5);
    }

    #[test]
    fn test_parse_http_args_rejects_strings() {
        let err = parse_http_args::<Pair>(serde_json::json!({ "a": "1", "b": 2 })).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_parse_route_args_missing_field() {
        let mut args = JsonObject::new();
        args.insert("a".to_string(), serde_json::json!(1));
        assert!(parse_route_args::<Pair>(Some(args)).is_err());
    }

    #[test]
    fn test_http_value_shape() {
        let value = to_http_value(&text_result("3")).unwrap();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "3");
        assert_eq!(value["isError"], false);
    }
}

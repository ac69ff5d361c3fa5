//! JSON-RPC message handling shared by both HTTP serving modes.
//!
//! The SSE mode and the direct mode differ only in framing; the request is
//! dispatched the same way in both.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::McpServer;
use crate::core::server::SERVER_INSTRUCTIONS;
use crate::domains::tools::ToolError;

/// Protocol version assumed when the client does not ask for a supported one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Protocol versions this server can speak.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Notifications carry no id and expect no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none() && self.method.starts_with("notifications/")
    }
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error: the body was not a valid JSON-RPC message.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(Some(serde_json::Value::Null), -32700, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Decode a raw request body, answering a parse error when it is not a
/// JSON-RPC message.
pub fn parse_message(body: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejecting malformed JSON-RPC message: {}", e);
        JsonRpcResponse::parse_error(format!("Parse error: {}", e))
    })
}

/// Process a JSON-RPC message.
///
/// Returns `None` for notifications, which get no response.
pub async fn process_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    if request.is_notification() {
        info!("Received notification: {}", request.method);
        return None;
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(server, request),
        "ping" => JsonRpcResponse::success(request.id, serde_json::json!({})),
        "tools/list" => handle_tools_list(server, request),
        "tools/call" => handle_tools_call(server, request).await,
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    };

    Some(response)
}

/// Pick the protocol version to answer an `initialize` with.
fn negotiate_protocol_version(params: Option<&serde_json::Value>) -> &'static str {
    params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .and_then(|requested| {
            SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .copied()
                .find(|supported| *supported == requested)
        })
        .unwrap_or(DEFAULT_PROTOCOL_VERSION)
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let protocol_version = negotiate_protocol_version(request.params.as_ref());
    info!("Processing initialize request (protocol {})", protocol_version);

    let result = serde_json::json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": SERVER_INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
fn handle_tools_list(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let result = serde_json::json!({
        "tools": server.list_tools()
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
async fn handle_tools_call(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id, "Missing tool name"),
    };
    info!("Processing tools/call request for '{}'", name);

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e @ (ToolError::NotFound(_) | ToolError::InvalidArguments(_))) => {
            JsonRpcResponse::invalid_params(request.id, e.to_string())
        }
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

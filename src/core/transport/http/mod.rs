//! HTTP transport implementation.
//!
//! Two serving modes share one listener:
//! - `GET /sse` + `POST /sse/message` (or `POST /sse`): streaming channel over
//!   Server-Sent Events
//! - `POST /mcp`: direct JSON-RPC request/response
//!
//! Any other path answers `404 Not found`.

pub mod rpc;
pub mod sse;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use super::{TransportConfig, TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use rpc::{parse_message, process_request};
use sse::{SSE_MESSAGE_PATH, SSE_PATH, SseSessions};

/// Path of the direct request/response endpoint.
pub const MCP_PATH: &str = "/mcp";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Open SSE sessions.
    sessions: SseSessions,
}

impl AppState {
    /// Create the state for a server with no open sessions.
    pub fn new(server: McpServer) -> Self {
        Self {
            server,
            sessions: SseSessions::default(),
        }
    }
}

/// Build the router serving both modes.
pub fn build_router(server: McpServer, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route(SSE_PATH, get(sse::handle_sse).post(sse::handle_sse_message))
        .route(SSE_MESSAGE_PATH, post(sse::handle_sse_message))
        .route(MCP_PATH, post(handle_mcp))
        .fallback(not_found)
        .with_state(AppState::new(server))
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Create from TransportConfig (extracts HTTP config).
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Http(http_config) => Some(Self::new(http_config.clone())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server, self.config.enable_cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → SSE:      GET {} (messages: POST {})", SSE_PATH, SSE_MESSAGE_PATH);
        info!("  → JSON-RPC: POST {}", MCP_PATH);

        axum::serve(listener, app)
            .await
            .map_err(TransportError::Serve)?;

        Ok(())
    }
}

/// `POST /mcp` - direct JSON-RPC request/response.
#[instrument(skip_all, fields(method))]
async fn handle_mcp(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_message(&body) {
        Ok(request) => request,
        Err(response) => return (StatusCode::OK, Json(response)).into_response(),
    };
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    match process_request(&state.server, request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Fallback for every unrouted path.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Not found",
    )
}

//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **HTTP**: an SSE event stream on `/sse` (requests posted to
//!   `/sse/message`) and direct JSON-RPC over POST on `/mcp` - feature: `http`
//! - **STDIO**: Standard input/output driven by rmcp - feature: `stdio`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;

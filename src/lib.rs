//! GIF Calculator MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a small
//! set of tools: two calculator tools and a GIPHY search tool that returns the
//! GIF itself as base64 image content.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, the main server
//!   and the transports (SSE stream on `/sse`, JSON-RPC over POST on `/mcp`, STDIO)
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools that can be executed by clients
//!
//! # Example
//!
//! ```rust,no_run
//! use gif_calculator_mcp::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

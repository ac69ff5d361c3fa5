//! Tools domain module.
//!
//! Tools are executable functions that MCP clients call by name with typed
//! arguments. Every tool answers with a `CallToolResult`; expected failures
//! (division by zero, missing API key, no search results, upstream errors)
//! are reported as text content rather than protocol errors.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - rmcp `ToolRouter` builder for the STDIO transport
//! - `registry.rs` - Read-only tool table and dispatch for the HTTP transports
//! - `error.rs` - Dispatch error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()`, `to_tool()`
//!    and `create_route()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs`
//! 4. Register it in `registry.rs` for the HTTP transports

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;

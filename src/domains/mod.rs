//! Business domains of the MCP server.
//!
//! Each domain is a bounded context with its own definitions, errors and
//! dispatch logic.

pub mod tools;

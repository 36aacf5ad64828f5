//! Wizlens MCP Server
//!
//! Serves the wizlens analytics tools to MCP clients over stdio. Stdout
//! carries the protocol, so nothing else in the process may print to it.

pub mod mcp;

pub use mcp::{serve_stdio, WizlensMcpServer};

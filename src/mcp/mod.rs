//! MCP (Model Context Protocol) server for Flick.
//!
//! Allows AI assistants like Claude to use Flick as a tool.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;
mod tools;

pub use server::McpServer;

//! MCP command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;

/// Run the MCP server.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Mcp) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let mut server = McpServer::new(settings);
    server.run().await
}

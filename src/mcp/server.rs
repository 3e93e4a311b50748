//! MCP server implementation.

use super::protocol::*;
use super::tools::get_tools;
use crate::config::Settings;
use crate::conversation::ConversationManager;
use crate::tools::{available_tools, SearchTool, ToolHits, ToolKind};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "flick";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Flick.
pub struct McpServer {
    settings: Settings,
    manager: Option<ConversationManager>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            manager: None,
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // Log to stderr so it doesn't interfere with JSON-RPC
        eprintln!("Flick MCP server starting...");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    eprintln!("Failed to parse request: {}", e);
                    let response = JsonRpcResponse::error(None, -32700, "Parse error");
                    writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
                    stdout.flush()?;
                    continue;
                }
            };

            let response = self.handle_request(request).await;
            writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
            stdout.flush()?;
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "initialized" => {
                // Notification, no response needed but we'll send empty success
                JsonRpcResponse::success(request.id, json!({}))
            }
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                -32601,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, id: Option<Value>) -> JsonRpcResponse {
        // Build the conversation manager lazily; it holds session history
        // for the ask tool.
        match crate::cli::commands::build_manager(&self.settings, None) {
            Ok(manager) => {
                self.manager = Some(manager);
                eprintln!("Conversation manager initialized");
            }
            Err(e) => {
                eprintln!("Failed to initialize: {}", e);
                return JsonRpcResponse::error(id, -32000, &format!("Init failed: {}", e));
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult { tools: get_tools() };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, -32602, &format!("Invalid params: {}", e))
                }
            },
            None => return JsonRpcResponse::error(id, -32602, "Missing params"),
        };

        let result = match params.name.as_str() {
            "ask" => self.tool_ask(params.arguments).await,
            "search_web" => self.tool_search(ToolKind::Web, "query", params.arguments).await,
            "movie_details" => self.tool_search(ToolKind::Movie, "title", params.arguments).await,
            "find_trailer" => self.tool_search(ToolKind::Video, "title", params.arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Ask tool: full pipeline with history.
    async fn tool_ask(&mut self, args: Option<Value>) -> ToolCallResult {
        let question = match required_str(&args, "question") {
            Ok(q) => q.to_string(),
            Err(e) => return e,
        };

        let manager = match &mut self.manager {
            Some(m) => m,
            None => return ToolCallResult::error("Server not initialized".to_string()),
        };

        match manager.process_query(&question).await {
            Ok(response) => {
                let mut output = response.answer;
                if let Some(trailer) = &response.trailer {
                    output.push_str(&format!("\n\n**Trailer:** {}", trailer.link));
                }
                ToolCallResult::text(output)
            }
            Err(e) => ToolCallResult::error(format!("Query failed: {}", e)),
        }
    }

    /// Run a single search tool of the given kind.
    async fn tool_search(
        &self,
        kind: ToolKind,
        arg_name: &str,
        args: Option<Value>,
    ) -> ToolCallResult {
        let query = match required_str(&args, arg_name) {
            Ok(q) => q.to_string(),
            Err(e) => return e,
        };

        let tool = match find_tool(&self.settings, kind) {
            Some(t) => t,
            None => {
                return ToolCallResult::error(format!(
                    "No {} tool configured (check your API keys with 'flick doctor')",
                    kind
                ))
            }
        };

        match tool.search(&query).await {
            Ok(hits) if hits.is_empty() => {
                ToolCallResult::text("No matching results found.".to_string())
            }
            Ok(hits) => ToolCallResult::text(format_hits(&hits)),
            Err(e) => ToolCallResult::error(format!("Search failed: {}", e)),
        }
    }
}

/// Look up the first configured tool of a kind.
fn find_tool(settings: &Settings, kind: ToolKind) -> Option<Arc<dyn SearchTool>> {
    available_tools(settings)
        .into_iter()
        .find(|t| t.kind() == kind)
}

/// Extract a required string argument.
fn required_str(args: &Option<Value>, name: &str) -> Result<String, ToolCallResult> {
    args.as_ref()
        .and_then(|a| a.get(name))
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| ToolCallResult::error(format!("Missing '{}' argument", name)))
}

/// Format search hits as markdown text.
fn format_hits(hits: &ToolHits) -> String {
    let mut output = format!("Found {} results:\n\n", hits.len());

    match hits {
        ToolHits::Web(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{}**\n   {}\n   {}\n\n",
                    i + 1,
                    hit.title,
                    hit.snippet,
                    hit.link
                ));
            }
        }
        ToolHits::Movie(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{} ({})**\n   IMDB: {} | {}\n   Directed by {}, starring {}\n   {}\n   {}\n\n",
                    i + 1,
                    hit.title,
                    hit.year,
                    hit.rating,
                    hit.genre,
                    hit.director,
                    hit.actors,
                    hit.plot,
                    hit.imdb_link
                ));
            }
        }
        ToolHits::Video(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                output.push_str(&format!(
                    "{}. **{}**\n   {}\n   {}\n\n",
                    i + 1,
                    hit.title,
                    hit.description,
                    hit.link
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::WebHit;

    #[test]
    fn test_required_str() {
        let args = Some(json!({ "question": "what is heat about" }));
        assert_eq!(required_str(&args, "question").unwrap(), "what is heat about");
        assert!(required_str(&args, "title").is_err());
        assert!(required_str(&None, "question").is_err());
    }

    #[test]
    fn test_format_web_hits() {
        let hits = ToolHits::Web(vec![WebHit {
            title: "Heat (1995)".to_string(),
            link: "https://www.imdb.com/title/tt0113277/".to_string(),
            snippet: "Crime drama".to_string(),
        }]);

        let text = format_hits(&hits);
        assert!(text.starts_with("Found 1 results:"));
        assert!(text.contains("**Heat (1995)**"));
        assert!(text.contains("https://www.imdb.com/title/tt0113277/"));
    }
}

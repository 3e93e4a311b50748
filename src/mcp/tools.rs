//! MCP tool definitions for Flick.

use super::protocol::Tool;
use serde_json::json;

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "ask".to_string(),
            description: "Ask a question about a movie or TV show and get an AI-generated \
                answer grounded in live web, OMDB, and YouTube searches. \
                Includes a trailer link when one is found."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The question to ask"
                    }
                },
                "required": ["question"]
            }),
        },
        Tool {
            name: "search_web".to_string(),
            description: "Run a raw web search and return the top results with titles, \
                snippets, and links."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "movie_details".to_string(),
            description: "Look up a movie or show by title in OMDB. Returns ratings, \
                release year, genre, director, cast, and plot."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Movie or show title to look up"
                    }
                },
                "required": ["title"]
            }),
        },
        Tool {
            name: "find_trailer".to_string(),
            description: "Find the official trailer for a movie or show on YouTube. \
                Returns the best matching video link."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Movie or show title to find a trailer for"
                    }
                },
                "required": ["title"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_schemas_have_required_fields() {
        let tools = get_tools();
        assert_eq!(tools.len(), 4);

        for tool in &tools {
            let required = tool.input_schema["required"].as_array().unwrap();
            assert!(!required.is_empty(), "{} has no required args", tool.name);
        }
    }
}

//! Conversation manager: the query-processing pipeline.

use super::context::build_context;
use super::{History, HistoryEntry, Role};
use crate::error::Result;
use crate::llm::ChatModel;
use crate::tools::{SearchTool, ToolHits, ToolKind, ToolOutcome, VideoHit};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Orchestrates tool calls, context building, and model generation for one
/// conversation session.
pub struct ConversationManager {
    tools: Vec<Arc<dyn SearchTool>>,
    llm: Arc<dyn ChatModel>,
    history: History,
}

impl ConversationManager {
    /// Create a manager over the given tools and chat model.
    pub fn new(tools: Vec<Arc<dyn SearchTool>>, llm: Arc<dyn ChatModel>) -> Self {
        Self {
            tools,
            llm,
            history: History::new(),
        }
    }

    /// The conversation log.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Cursor past the current end of the log.
    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    /// Entries appended since the given cursor.
    pub fn entries_since(&self, cursor: usize) -> &[HistoryEntry] {
        self.history.entries_since(cursor)
    }

    /// Names of the configured tools.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// First configured tool of the given kind.
    fn tool(&self, kind: ToolKind) -> Option<Arc<dyn SearchTool>> {
        self.tools.iter().find(|t| t.kind() == kind).cloned()
    }

    /// Run one tool call, converting errors into a recorded failure.
    async fn run_tool(&self, tool: &Arc<dyn SearchTool>, query: &str) -> ToolOutcome {
        match tool.search(query).await {
            Ok(hits) => {
                debug!("{} returned {} hits", tool.name(), hits.len());
                ToolOutcome::Ok { hits }
            }
            Err(e) => {
                warn!("{} failed: {}", tool.name(), e);
                ToolOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Process one user query end to end.
    ///
    /// Appends exactly one user message up front and exactly one assistant
    /// message with the model's reply at the end. Tool failures are recorded
    /// in history and never abort the pipeline; model failures propagate.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn process_query(&mut self, query: &str) -> Result<QueryResponse> {
        info!("Processing query: {}", query);

        self.history.push_message(Role::User, query);

        let mut tool_results = HashMap::new();

        // Web search biased toward IMDB-style metadata.
        if let Some(tool) = self.tool(ToolKind::Web) {
            let biased = format!("{} imdb rating release date director starring", query);
            let outcome = self.run_tool(&tool, &biased).await;
            self.history.push_tool_call(tool.name(), &biased, outcome.clone());
            tool_results.insert("search".to_string(), outcome);
        }

        // Title lookup against the movie metadata API.
        if let Some(tool) = self.tool(ToolKind::Movie) {
            let outcome = self.run_tool(&tool, query).await;
            self.history.push_tool_call(tool.name(), query, outcome.clone());
            tool_results.insert("movie".to_string(), outcome);
        }

        // Trailer lookup, keeping only the best hit.
        let mut trailer: Option<VideoHit> = None;
        if let Some(tool) = self.tool(ToolKind::Video) {
            let trailer_query = format!("{} trailer", query);
            let mut outcome = self.run_tool(&tool, &trailer_query).await;

            if let ToolOutcome::Ok { hits } = &mut outcome {
                hits.truncate(1);
            }
            if let ToolOutcome::Ok {
                hits: ToolHits::Video(hits),
            } = &outcome
            {
                trailer = hits.first().cloned();
            }

            self.history
                .push_tool_call(tool.name(), &trailer_query, outcome.clone());
            tool_results.insert("youtube".to_string(), outcome);
        }

        if let Some(hit) = &trailer {
            self.history.push_message(
                Role::Assistant,
                format!("Here is the trailer for {}: {}", query, hit.link),
            );
        }

        // Build context from everything recorded so far and ask the model.
        let context = build_context(self.history.entries());
        let context_ref = if context.is_empty() {
            None
        } else {
            Some(context.as_str())
        };

        let answer = self.llm.generate(query, context_ref).await?;
        self.history.push_message(Role::Assistant, &answer);

        Ok(QueryResponse {
            answer,
            trailer,
            tool_results,
        })
    }
}

/// Result of processing one query.
#[derive(Debug)]
pub struct QueryResponse {
    /// The model's conversational answer.
    pub answer: String,
    /// The trailer hit announced in history, if any.
    pub trailer: Option<VideoHit>,
    /// Recorded outcome per tool slot ("search", "movie", "youtube").
    pub tool_results: HashMap<String, ToolOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlickError;
    use crate::tools::{MovieHit, WebHit};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockTool {
        name: &'static str,
        kind: ToolKind,
        response: std::result::Result<ToolHits, String>,
    }

    #[async_trait]
    impl SearchTool for MockTool {
        fn name(&self) -> &str {
            self.name
        }

        fn kind(&self) -> ToolKind {
            self.kind
        }

        async fn search(&self, _query: &str) -> Result<ToolHits> {
            match &self.response {
                Ok(hits) => Ok(hits.clone()),
                Err(reason) => Err(FlickError::Search(reason.clone())),
            }
        }
    }

    #[derive(Default)]
    struct MockChat {
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    #[async_trait]
    impl ChatModel for MockChat {
        async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), context.map(String::from)));
            Ok("mock answer".to_string())
        }

        fn model(&self) -> &str {
            "mock"
        }
    }

    fn web_tool(hits: Vec<WebHit>) -> Arc<dyn SearchTool> {
        Arc::new(MockTool {
            name: "DuckDuckGo Search",
            kind: ToolKind::Web,
            response: Ok(ToolHits::Web(hits)),
        })
    }

    fn video_tool(hits: Vec<VideoHit>) -> Arc<dyn SearchTool> {
        Arc::new(MockTool {
            name: "YouTube Search",
            kind: ToolKind::Video,
            response: Ok(ToolHits::Video(hits)),
        })
    }

    fn video_hit(id: &str) -> VideoHit {
        VideoHit {
            title: format!("Trailer {}", id),
            description: "Official trailer".to_string(),
            thumbnail: String::new(),
            link: format!("https://www.youtube.com/watch?v={}", id),
            video_id: id.to_string(),
        }
    }

    fn leading_user_and_trailing_assistant(entries: &[HistoryEntry]) -> bool {
        matches!(
            entries.first(),
            Some(HistoryEntry::Message {
                role: Role::User,
                ..
            })
        ) && matches!(
            entries.last(),
            Some(HistoryEntry::Message {
                role: Role::Assistant,
                ..
            })
        )
    }

    #[tokio::test]
    async fn test_history_shape_with_no_tools() {
        let llm = Arc::new(MockChat::default());
        let mut manager = ConversationManager::new(Vec::new(), llm.clone());

        let response = manager.process_query("The Batman").await.unwrap();

        assert_eq!(response.answer, "mock answer");
        assert!(response.trailer.is_none());
        assert!(response.tool_results.is_empty());

        let entries = manager.history().entries();
        assert_eq!(entries.len(), 2);
        assert!(leading_user_and_trailing_assistant(entries));

        // No tool results means no context at all.
        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("The Batman".to_string(), None));
    }

    #[tokio::test]
    async fn test_history_shape_with_all_tools() {
        let movie = Arc::new(MockTool {
            name: "OMDB Search",
            kind: ToolKind::Movie,
            response: Ok(ToolHits::Movie(vec![MovieHit {
                title: "The Batman".to_string(),
                year: "2022".to_string(),
                rating: "7.8".to_string(),
                genre: "Action".to_string(),
                director: "Matt Reeves".to_string(),
                actors: "Robert Pattinson".to_string(),
                plot: "Gotham.".to_string(),
                poster: String::new(),
                imdb_link: "https://www.imdb.com/title/tt1877830".to_string(),
            }])),
        });

        let tools: Vec<Arc<dyn SearchTool>> = vec![
            web_tool(vec![WebHit {
                title: "The Batman (2022)".to_string(),
                link: "https://www.imdb.com/title/tt1877830/".to_string(),
                snippet: "IMDB rating 7.8/10".to_string(),
            }]),
            movie,
            video_tool(vec![video_hit("abc123def45")]),
        ];

        let llm = Arc::new(MockChat::default());
        let mut manager = ConversationManager::new(tools, llm.clone());

        let response = manager.process_query("The Batman").await.unwrap();

        let entries = manager.history().entries();
        // user, 3 tool calls, trailer message, assistant reply
        assert_eq!(entries.len(), 6);
        assert!(leading_user_and_trailing_assistant(entries));

        let tool_calls = entries
            .iter()
            .filter(|e| matches!(e, HistoryEntry::ToolCall { .. }))
            .count();
        assert_eq!(tool_calls, 3);

        assert!(response.tool_results.contains_key("search"));
        assert!(response.tool_results.contains_key("movie"));
        assert!(response.tool_results.contains_key("youtube"));
    }

    #[tokio::test]
    async fn test_trailer_list_truncated_to_one() {
        let tools: Vec<Arc<dyn SearchTool>> =
            vec![video_tool(vec![video_hit("first000001"), video_hit("second00002")])];

        let llm = Arc::new(MockChat::default());
        let mut manager = ConversationManager::new(tools, llm);

        let response = manager.process_query("The Batman").await.unwrap();

        // Recorded outcome is already truncated.
        let outcome = &response.tool_results["youtube"];
        assert_eq!(outcome.hits().unwrap().len(), 1);

        let trailer = response.trailer.unwrap();
        assert_eq!(trailer.video_id, "first000001");

        // Exactly one trailer announcement, referencing the surviving hit.
        let announcements: Vec<_> = manager
            .history()
            .entries()
            .iter()
            .filter_map(|e| match e {
                HistoryEntry::Message {
                    role: Role::Assistant,
                    content,
                    ..
                } if content.starts_with("Here is the trailer") => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(announcements.len(), 1);
        assert!(announcements[0].contains("https://www.youtube.com/watch?v=first000001"));
    }

    #[tokio::test]
    async fn test_no_trailer_message_when_video_search_empty() {
        let tools: Vec<Arc<dyn SearchTool>> = vec![video_tool(Vec::new())];

        let llm = Arc::new(MockChat::default());
        let mut manager = ConversationManager::new(tools, llm);

        let response = manager.process_query("Obscure Title").await.unwrap();
        assert!(response.trailer.is_none());

        // user, tool call, assistant reply -- no announcement in between
        assert_eq!(manager.history().len(), 3);
    }

    #[tokio::test]
    async fn test_tool_failure_is_recorded_not_propagated() {
        let failing: Arc<dyn SearchTool> = Arc::new(MockTool {
            name: "DuckDuckGo Search",
            kind: ToolKind::Web,
            response: Err("connection refused".to_string()),
        });

        let llm = Arc::new(MockChat::default());
        let mut manager = ConversationManager::new(vec![failing], llm.clone());

        let response = manager.process_query("The Batman").await.unwrap();
        assert_eq!(response.answer, "mock answer");

        match &response.tool_results["search"] {
            ToolOutcome::Failed { reason } => assert!(reason.contains("connection refused")),
            other => panic!("expected failure outcome, got {:?}", other),
        }

        // A failed tool contributes no context text.
        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls[0].1, None);
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        struct FailingChat;

        #[async_trait]
        impl ChatModel for FailingChat {
            async fn generate(&self, _prompt: &str, _context: Option<&str>) -> Result<String> {
                Err(FlickError::Groq("rate limited".to_string()))
            }

            fn model(&self) -> &str {
                "mock"
            }
        }

        let mut manager = ConversationManager::new(Vec::new(), Arc::new(FailingChat));
        let result = manager.process_query("The Batman").await;
        assert!(matches!(result, Err(FlickError::Groq(_))));
    }

    #[tokio::test]
    async fn test_the_batman_example() {
        // Mocked web adapter with one hit and trailer adapter with two hits:
        // trailer truncated to 1, announcement references its link, and the
        // model context contains the literal snippet.
        let tools: Vec<Arc<dyn SearchTool>> = vec![
            web_tool(vec![WebHit {
                title: "The Batman (2022)".to_string(),
                link: "https://www.imdb.com/title/tt1877830/".to_string(),
                snippet: "IMDB rating 7.8/10".to_string(),
            }]),
            video_tool(vec![video_hit("mqqft2x_Aa4"), video_hit("u34gHaRiBIU")]),
        ];

        let llm = Arc::new(MockChat::default());
        let mut manager = ConversationManager::new(tools, llm.clone());

        let response = manager.process_query("The Batman").await.unwrap();

        assert_eq!(response.tool_results["youtube"].hits().unwrap().len(), 1);
        assert_eq!(
            response.trailer.unwrap().link,
            "https://www.youtube.com/watch?v=mqqft2x_Aa4"
        );

        let calls = llm.calls.lock().unwrap();
        let context = calls[0].1.as_deref().unwrap();
        assert!(context.contains("IMDB rating 7.8/10"));
    }
}

//! Search tool adapters for Flick.
//!
//! Provides a trait-based interface over the external search APIs (web
//! search, movie metadata, trailer lookup). Each adapter turns a free-text
//! query into a normalized hit list via one external HTTP call surface.

mod duckduckgo;
mod google;
mod omdb;
mod youtube;

pub use duckduckgo::DuckDuckGoSearch;
pub use google::GoogleSearch;
pub use omdb::OmdbSearch;
pub use youtube::YouTubeSearch;

use crate::config::{Settings, WebProvider};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Kind of search tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// General web search.
    Web,
    /// Movie/series metadata lookup.
    Movie,
    /// Trailer video search.
    Video,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::Web => write!(f, "web"),
            ToolKind::Movie => write!(f, "movie"),
            ToolKind::Video => write!(f, "video"),
        }
    }
}

/// A plain web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// A movie or series record from the metadata API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieHit {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub plot: String,
    pub poster: String,
    pub imdb_link: String,
}

/// A video search hit (trailer candidate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoHit {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub link: String,
    pub video_id: String,
}

/// Hit list from one tool call, tagged by tool kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "hits", rename_all = "lowercase")]
pub enum ToolHits {
    Web(Vec<WebHit>),
    Movie(Vec<MovieHit>),
    Video(Vec<VideoHit>),
}

impl ToolHits {
    /// Number of hits in the list.
    pub fn len(&self) -> usize {
        match self {
            ToolHits::Web(hits) => hits.len(),
            ToolHits::Movie(hits) => hits.len(),
            ToolHits::Video(hits) => hits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep at most `max` hits, dropping the rest.
    pub fn truncate(&mut self, max: usize) {
        match self {
            ToolHits::Web(hits) => hits.truncate(max),
            ToolHits::Movie(hits) => hits.truncate(max),
            ToolHits::Video(hits) => hits.truncate(max),
        }
    }
}

/// Outcome of one tool call, as recorded in conversation history.
///
/// Keeps "no matches" (Ok with an empty list) distinguishable from
/// "the API call failed" (Failed with a reason).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome {
    Ok { hits: ToolHits },
    Failed { reason: String },
}

impl ToolOutcome {
    /// The hit list, if the call succeeded.
    pub fn hits(&self) -> Option<&ToolHits> {
        match self {
            ToolOutcome::Ok { hits } => Some(hits),
            ToolOutcome::Failed { .. } => None,
        }
    }

    /// True when the call failed or returned no hits.
    pub fn is_empty(&self) -> bool {
        self.hits().map_or(true, ToolHits::is_empty)
    }
}

impl From<Result<ToolHits>> for ToolOutcome {
    fn from(result: Result<ToolHits>) -> Self {
        match result {
            Ok(hits) => ToolOutcome::Ok { hits },
            Err(e) => ToolOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Trait for search tool adapters.
#[async_trait]
pub trait SearchTool: Send + Sync {
    /// Display name of the tool (used in history and context headers).
    fn name(&self) -> &str;

    /// What kind of results this tool produces.
    fn kind(&self) -> ToolKind;

    /// Run a search and return normalized hits.
    async fn search(&self, query: &str) -> Result<ToolHits>;
}

/// Browser-like user agent for plain HTTP endpoints that reject bot defaults.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Build the shared HTTP client used by the adapters.
pub(crate) fn http_client(timeout_seconds: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .expect("Failed to create HTTP client")
}

/// Build the set of tools enabled by settings and environment.
///
/// Adapters whose API keys are missing are skipped with a warning rather
/// than failing the whole session.
pub fn available_tools(settings: &Settings) -> Vec<Arc<dyn SearchTool>> {
    let mut tools: Vec<Arc<dyn SearchTool>> = Vec::new();

    match settings.search.web_provider {
        WebProvider::DuckDuckGo => {
            tools.push(Arc::new(DuckDuckGoSearch::new(&settings.search)));
        }
        WebProvider::Google => match GoogleSearch::from_env(&settings.search) {
            Ok(tool) => tools.push(Arc::new(tool)),
            Err(e) => warn!("Google search disabled: {}", e),
        },
    }

    match OmdbSearch::from_env(&settings.search) {
        Ok(tool) => tools.push(Arc::new(tool)),
        Err(e) => warn!("OMDB lookup disabled: {}", e),
    }

    match YouTubeSearch::from_env(&settings.search) {
        Ok(tool) => tools.push(Arc::new(tool)),
        Err(e) => warn!("YouTube search disabled: {}", e),
    }

    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_hits_truncate() {
        let mut hits = ToolHits::Video(vec![
            VideoHit {
                title: "Trailer 1".to_string(),
                description: String::new(),
                thumbnail: String::new(),
                link: "https://www.youtube.com/watch?v=a".to_string(),
                video_id: "a".to_string(),
            },
            VideoHit {
                title: "Trailer 2".to_string(),
                description: String::new(),
                thumbnail: String::new(),
                link: "https://www.youtube.com/watch?v=b".to_string(),
                video_id: "b".to_string(),
            },
        ]);

        hits.truncate(1);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_outcome_from_error_is_empty() {
        let outcome: ToolOutcome =
            Err(crate::error::FlickError::Search("boom".to_string())).into();
        assert!(outcome.is_empty());
        assert!(matches!(outcome, ToolOutcome::Failed { ref reason } if reason.contains("boom")));
    }

    #[test]
    fn test_outcome_empty_ok_is_distinguishable() {
        let outcome = ToolOutcome::Ok {
            hits: ToolHits::Web(Vec::new()),
        };
        assert!(outcome.is_empty());
        assert!(outcome.hits().is_some());
    }
}

//! Google Custom Search adapter.

use super::{http_client, SearchTool, ToolHits, ToolKind, WebHit};
use crate::config::SearchSettings;
use crate::error::{FlickError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

const SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search JSON API tool.
pub struct GoogleSearch {
    http: reqwest::Client,
    api_key: String,
    cse_id: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleSearch {
    /// Create a search tool from `GOOGLE_API_KEY` and `GOOGLE_CSE_ID`.
    pub fn from_env(settings: &SearchSettings) -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| FlickError::Config("GOOGLE_API_KEY not set".to_string()))?;
        let cse_id = std::env::var("GOOGLE_CSE_ID")
            .map_err(|_| FlickError::Config("GOOGLE_CSE_ID not set".to_string()))?;

        Ok(Self::new(&api_key, &cse_id, settings))
    }

    pub fn new(api_key: &str, cse_id: &str, settings: &SearchSettings) -> Self {
        Self {
            http: http_client(settings.timeout_seconds),
            api_key: api_key.to_string(),
            cse_id: cse_id.to_string(),
            max_results: settings.max_results,
        }
    }
}

#[async_trait]
impl SearchTool for GoogleSearch {
    fn name(&self) -> &str {
        "Google Search"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Web
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<ToolHits> {
        let num = self.max_results.min(10).to_string();

        let response: SearchResponse = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| FlickError::Search(format!("Google search failed: {}", e)))?
            .json()
            .await?;

        let hits = response
            .items
            .into_iter()
            .map(|item| WebHit {
                title: item.title,
                link: item.link,
                snippet: item.snippet,
            })
            .collect::<Vec<_>>();

        debug!("Google returned {} hits", hits.len());
        Ok(ToolHits::Web(hits))
    }
}

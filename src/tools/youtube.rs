//! YouTube trailer search adapter.

use super::{http_client, SearchTool, ToolHits, ToolKind, VideoHit};
use crate::config::SearchSettings;
use crate::error::{FlickError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, instrument};

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// YouTube Data API v3 search tool.
pub struct YouTubeSearch {
    http: reqwest::Client,
    api_key: String,
    max_results: usize,
    video_id_regex: Regex,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId", default)]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    url: String,
}

impl YouTubeSearch {
    /// Create a search tool from `YOUTUBE_API_KEY`.
    pub fn from_env(settings: &SearchSettings) -> Result<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| FlickError::Config("YOUTUBE_API_KEY not set".to_string()))?;

        Ok(Self::new(&api_key, settings))
    }

    pub fn new(api_key: &str, settings: &SearchSettings) -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self {
            http: http_client(settings.timeout_seconds),
            api_key: api_key.to_string(),
            max_results: settings.max_results,
            video_id_regex,
        }
    }

    /// Extract a video ID from a YouTube URL or bare ID.
    pub fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    /// Bias a free-text query toward trailer results.
    fn trailer_terms(query: &str) -> String {
        let lowered = query.to_lowercase();
        if lowered.contains("trailer") {
            lowered
        } else {
            format!("{} official trailer movie", lowered)
        }
    }
}

#[async_trait]
impl SearchTool for YouTubeSearch {
    fn name(&self) -> &str {
        "YouTube Search"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Video
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<ToolHits> {
        let terms = Self::trailer_terms(query);
        let max = self.max_results.to_string();

        let response: SearchResponse = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", terms.as_str()),
                ("part", "snippet"),
                ("maxResults", max.as_str()),
                ("type", "video"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| FlickError::Search(format!("YouTube search failed: {}", e)))?
            .json()
            .await?;

        let hits = response
            .items
            .into_iter()
            .filter(|item| !item.id.video_id.is_empty())
            .map(|item| {
                let video_id = item.id.video_id;
                VideoHit {
                    title: item.snippet.title,
                    description: item.snippet.description,
                    thumbnail: item
                        .snippet
                        .thumbnails
                        .default
                        .map(|t| t.url)
                        .unwrap_or_default(),
                    link: format!("https://www.youtube.com/watch?v={}", video_id),
                    video_id,
                }
            })
            .collect::<Vec<_>>();

        debug!("YouTube returned {} hits", hits.len());
        Ok(ToolHits::Video(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> YouTubeSearch {
        YouTubeSearch::new("test-key", &SearchSettings::default())
    }

    #[test]
    fn test_extract_video_id() {
        let source = tool();

        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );

        assert_eq!(source.extract_video_id("not-a-video-id"), None);
        assert_eq!(source.extract_video_id(""), None);
    }

    #[test]
    fn test_trailer_terms() {
        assert_eq!(
            YouTubeSearch::trailer_terms("The Batman"),
            "the batman official trailer movie"
        );
        assert_eq!(
            YouTubeSearch::trailer_terms("The Batman trailer"),
            "the batman trailer"
        );
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "items": [
                {
                    "id": {"kind": "youtube#video", "videoId": "abc123def45"},
                    "snippet": {
                        "title": "THE BATMAN - Main Trailer",
                        "description": "In his second year of fighting crime...",
                        "thumbnails": {"default": {"url": "https://i.ytimg.com/vi/abc123def45/default.jpg"}}
                    }
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].id.video_id, "abc123def45");
        assert_eq!(parsed.items[0].snippet.title, "THE BATMAN - Main Trailer");
    }
}

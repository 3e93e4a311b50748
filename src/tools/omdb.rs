//! OMDB movie metadata adapter.
//!
//! Runs a title search, then fetches full details for the top matches so the
//! context includes ratings, cast, and plot rather than bare titles.

use super::{http_client, MovieHit, SearchTool, ToolHits, ToolKind};
use crate::config::SearchSettings;
use crate::error::{FlickError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const API_URL: &str = "https://www.omdbapi.com/";

/// OMDB search tool.
pub struct OmdbSearch {
    http: reqwest::Client,
    api_key: String,
    detail_limit: usize,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    matches: Vec<SearchMatch>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct TitleDetail {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "imdbRating", default)]
    rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
}

impl OmdbSearch {
    /// Create a search tool from `OMDB_API_KEY`.
    pub fn from_env(settings: &SearchSettings) -> Result<Self> {
        let api_key = std::env::var("OMDB_API_KEY")
            .map_err(|_| FlickError::Config("OMDB_API_KEY not set".to_string()))?;

        Ok(Self::new(&api_key, settings))
    }

    pub fn new(api_key: &str, settings: &SearchSettings) -> Self {
        Self {
            http: http_client(settings.timeout_seconds),
            api_key: api_key.to_string(),
            detail_limit: settings.detail_limit,
        }
    }

    /// Fetch full details for a single title by imdbID.
    async fn fetch_detail(&self, imdb_id: &str) -> Result<Option<MovieHit>> {
        let detail: TitleDetail = self
            .http
            .get(API_URL)
            .query(&[("apikey", self.api_key.as_str()), ("i", imdb_id)])
            .send()
            .await?
            .json()
            .await?;

        if detail.response != "True" {
            return Ok(None);
        }

        let rating = if detail.rating.is_empty() {
            "N/A".to_string()
        } else {
            detail.rating
        };

        Ok(Some(MovieHit {
            title: detail.title,
            year: detail.year,
            rating,
            genre: detail.genre,
            director: detail.director,
            actors: detail.actors,
            plot: detail.plot,
            poster: detail.poster,
            imdb_link: format!("https://www.imdb.com/title/{}", detail.imdb_id),
        }))
    }
}

#[async_trait]
impl SearchTool for OmdbSearch {
    fn name(&self) -> &str {
        "OMDB Search"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Movie
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<ToolHits> {
        let page: SearchPage = self
            .http
            .get(API_URL)
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .send()
            .await?
            .json()
            .await?;

        // "Movie not found!" is a normal empty result, not a failure.
        if page.response != "True" {
            debug!("OMDB found no matches for '{}'", query);
            return Ok(ToolHits::Movie(Vec::new()));
        }

        let mut hits = Vec::new();
        for item in page.matches.iter().take(self.detail_limit) {
            match self.fetch_detail(&item.imdb_id).await {
                Ok(Some(hit)) => hits.push(hit),
                Ok(None) => {}
                Err(e) => warn!("OMDB detail lookup failed for {}: {}", item.imdb_id, e),
            }
        }

        debug!("OMDB returned {} hits", hits.len());
        Ok(ToolHits::Movie(hits))
    }
}

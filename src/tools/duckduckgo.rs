//! DuckDuckGo web search adapter.
//!
//! DuckDuckGo has no official search API, so this adapter scrapes the HTML
//! endpoint and normalizes the result rows. No API key required.

use super::{http_client, SearchTool, ToolHits, ToolKind, WebHit};
use crate::config::SearchSettings;
use crate::error::{FlickError, Result};
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo HTML search tool.
pub struct DuckDuckGoSearch {
    http: reqwest::Client,
    result_sel: Selector,
    title_sel: Selector,
    snippet_sel: Selector,
    whitespace: Regex,
    max_results: usize,
}

impl DuckDuckGoSearch {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            http: http_client(settings.timeout_seconds),
            result_sel: Selector::parse("div.result").expect("Invalid selector"),
            title_sel: Selector::parse("a.result__a").expect("Invalid selector"),
            snippet_sel: Selector::parse("a.result__snippet").expect("Invalid selector"),
            whitespace: Regex::new(r"\s+").expect("Invalid regex"),
            max_results: settings.max_results,
        }
    }

    /// Collapse runs of scraped whitespace into single spaces.
    fn clean(&self, text: &str) -> String {
        self.whitespace.replace_all(text.trim(), " ").into_owned()
    }

    /// Resolve a result link, decoding the `uddg` redirect parameter.
    ///
    /// Result anchors point at `//duckduckgo.com/l/?uddg=<urlencoded>` rather
    /// than the target site directly.
    fn resolve_link(&self, href: &str) -> String {
        let absolute = if href.starts_with("//") {
            format!("https:{}", href)
        } else {
            href.to_string()
        };

        if let Ok(parsed) = url::Url::parse(&absolute) {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }

        absolute
    }

    /// Parse result rows out of the response body.
    fn parse_results(&self, body: &str) -> Vec<WebHit> {
        let document = Html::parse_document(body);
        let mut hits = Vec::new();

        for row in document.select(&self.result_sel) {
            let Some(anchor) = row.select(&self.title_sel).next() else {
                continue;
            };

            let title = self.clean(&anchor.text().collect::<String>());
            if title.is_empty() {
                continue;
            }

            let link = anchor
                .value()
                .attr("href")
                .map(|href| self.resolve_link(href))
                .unwrap_or_else(|| "https://duckduckgo.com".to_string());

            let snippet = row
                .select(&self.snippet_sel)
                .next()
                .map(|s| self.clean(&s.text().collect::<String>()))
                .unwrap_or_default();

            hits.push(WebHit {
                title,
                link,
                snippet,
            });

            if hits.len() >= self.max_results {
                break;
            }
        }

        hits
    }
}

#[async_trait]
impl SearchTool for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "DuckDuckGo Search"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Web
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str) -> Result<ToolHits> {
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FlickError::Search(format!(
                "DuckDuckGo returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let hits = self.parse_results(&body);

        debug!("DuckDuckGo returned {} hits", hits.len());
        Ok(ToolHits::Web(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> DuckDuckGoSearch {
        DuckDuckGoSearch::new(&SearchSettings::default())
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(tool().clean("  The\n  Batman \t (2022)  "), "The Batman (2022)");
    }

    #[test]
    fn test_resolve_link_decodes_uddg() {
        let link = tool().resolve_link(
            "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.imdb.com%2Ftitle%2Ftt1877830%2F&rut=abc",
        );
        assert_eq!(link, "https://www.imdb.com/title/tt1877830/");
    }

    #[test]
    fn test_resolve_link_passes_plain_urls() {
        let link = tool().resolve_link("https://example.com/page");
        assert_eq!(link, "https://example.com/page");
    }

    #[test]
    fn test_parse_results() {
        let body = r#"
            <html><body>
              <div class="result">
                <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.imdb.com%2Ftitle%2Ftt1877830%2F">The Batman (2022) - IMDb</a>
                <a class="result__snippet">IMDB rating 7.8/10. Directed by Matt Reeves.</a>
              </div>
              <div class="result">
                <a class="result__a" href="https://example.com">Other</a>
              </div>
            </body></html>
        "#;

        let hits = tool().parse_results(body);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "The Batman (2022) - IMDb");
        assert_eq!(hits[0].link, "https://www.imdb.com/title/tt1877830/");
        assert!(hits[0].snippet.contains("7.8/10"));
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn test_parse_results_respects_max() {
        let row = r#"<div class="result"><a class="result__a" href="https://e.com">T</a></div>"#;
        let body = format!("<html><body>{}</body></html>", row.repeat(10));

        let hits = tool().parse_results(&body);
        assert_eq!(hits.len(), SearchSettings::default().max_results);
    }
}

//! Context building from recorded tool calls.

use super::HistoryEntry;
use crate::tools::ToolHits;

/// Build the context blob fed to the chat model.
///
/// Walks tool-call entries in insertion order. Failed or empty outcomes
/// contribute nothing, so a session where every search came up dry (or every
/// API errored) yields the empty string.
pub fn build_context(entries: &[HistoryEntry]) -> String {
    let mut parts = Vec::new();

    for entry in entries {
        let HistoryEntry::ToolCall {
            tool,
            query,
            outcome,
            ..
        } = entry
        else {
            continue;
        };

        let Some(hits) = outcome.hits() else {
            continue;
        };
        if hits.is_empty() {
            continue;
        }

        parts.push(format!("Search results for '{}' using {}:", query, tool));

        match hits {
            ToolHits::Web(hits) => {
                for (i, hit) in hits.iter().enumerate() {
                    parts.push(format!("{}. {}\n   {}\n", i + 1, hit.title, hit.snippet));
                }
            }
            ToolHits::Movie(hits) => {
                for (i, hit) in hits.iter().enumerate() {
                    parts.push(format!(
                        "{}. {} ({})\n   IMDB Rating: {}\n   Genre: {}\n   Director: {}\n   Actors: {}\n   Plot: {}\n   IMDB: {}\n",
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
                    parts.push(format!(
                        "{}. {}\n   {}\n   Link: {}\n",
                        i + 1,
                        hit.title,
                        hit.description,
                        hit.link
                    ));
                }
            }
        }
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{History, Role};
    use crate::tools::{MovieHit, ToolOutcome, WebHit};

    fn web_hit(title: &str, snippet: &str) -> WebHit {
        WebHit {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn test_empty_history_yields_empty_context() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn test_messages_contribute_nothing() {
        let mut history = History::new();
        history.push_message(Role::User, "The Batman");
        history.push_message(Role::Assistant, "Sure!");
        assert_eq!(build_context(history.entries()), "");
    }

    #[test]
    fn test_failed_and_empty_outcomes_contribute_nothing() {
        let mut history = History::new();
        history.push_tool_call(
            "DuckDuckGo Search",
            "q",
            ToolOutcome::Failed {
                reason: "timeout".to_string(),
            },
        );
        history.push_tool_call(
            "OMDB Search",
            "q",
            ToolOutcome::Ok {
                hits: ToolHits::Movie(Vec::new()),
            },
        );
        assert_eq!(build_context(history.entries()), "");
    }

    #[test]
    fn test_web_hits_format() {
        let mut history = History::new();
        history.push_tool_call(
            "DuckDuckGo Search",
            "the batman imdb",
            ToolOutcome::Ok {
                hits: ToolHits::Web(vec![web_hit("The Batman (2022)", "IMDB rating 7.8/10")]),
            },
        );

        let context = build_context(history.entries());
        assert!(context.contains("Search results for 'the batman imdb' using DuckDuckGo Search:"));
        assert!(context.contains("1. The Batman (2022)"));
        assert!(context.contains("IMDB rating 7.8/10"));
    }

    #[test]
    fn test_movie_hits_format() {
        let mut history = History::new();
        history.push_tool_call(
            "OMDB Search",
            "heat",
            ToolOutcome::Ok {
                hits: ToolHits::Movie(vec![MovieHit {
                    title: "Heat".to_string(),
                    year: "1995".to_string(),
                    rating: "8.3".to_string(),
                    genre: "Crime, Drama".to_string(),
                    director: "Michael Mann".to_string(),
                    actors: "Al Pacino, Robert De Niro".to_string(),
                    plot: "A group of high-end thieves...".to_string(),
                    poster: String::new(),
                    imdb_link: "https://www.imdb.com/title/tt0113277".to_string(),
                }]),
            },
        );

        let context = build_context(history.entries());
        assert!(context.contains("1. Heat (1995)"));
        assert!(context.contains("IMDB Rating: 8.3"));
        assert!(context.contains("Director: Michael Mann"));
        assert!(context.contains("IMDB: https://www.imdb.com/title/tt0113277"));
    }

    #[test]
    fn test_sections_follow_insertion_order() {
        let mut history = History::new();
        history.push_tool_call(
            "DuckDuckGo Search",
            "first",
            ToolOutcome::Ok {
                hits: ToolHits::Web(vec![web_hit("A", "a")]),
            },
        );
        history.push_tool_call(
            "DuckDuckGo Search",
            "second",
            ToolOutcome::Ok {
                hits: ToolHits::Web(vec![web_hit("B", "b")]),
            },
        );

        let context = build_context(history.entries());
        let first = context.find("'first'").unwrap();
        let second = context.find("'second'").unwrap();
        assert!(first < second);
    }
}

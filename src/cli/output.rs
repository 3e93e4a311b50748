//! CLI output formatting utilities.

use crate::tools::{MovieHit, VideoHit, WebHit};
use console::{style, Style};
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print a web search hit.
    pub fn web_hit(hit: &WebHit) {
        println!("  {} {}", style("*").cyan(), style(&hit.title).bold());
        println!("    {}", content_preview(&hit.snippet, 200));
        println!("    {}", style(&hit.link).dim());
    }

    /// Print a movie record.
    pub fn movie_hit(hit: &MovieHit) {
        println!(
            "  {} {} ({})",
            style("*").cyan(),
            style(&hit.title).bold(),
            hit.year
        );
        println!("    IMDB: {} | {}", hit.rating, hit.genre);
        println!("    Directed by {}, starring {}", hit.director, hit.actors);
        println!("    {}", content_preview(&hit.plot, 200));
        println!("    {}", style(&hit.imdb_link).dim());
    }

    /// Print a video hit.
    pub fn video_hit(hit: &VideoHit) {
        println!("  {} {}", style("*").cyan(), style(&hit.title).bold());
        println!("    {}", content_preview(&hit.description, 200));
        println!("    {}", style(&hit.link).dim());
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Style for titles.
    pub fn title_style() -> Style {
        Style::new().bold()
    }

    /// Style for dim text.
    pub fn dim_style() -> Style {
        Style::new().dim()
    }
}

/// Truncate content with ellipsis, respecting char boundaries.
fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    match content.char_indices().nth(max_len) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview_short_text_untouched() {
        assert_eq!(content_preview("a plot", 200), "a plot");
    }

    #[test]
    fn test_content_preview_truncates_long_text() {
        let long = "x".repeat(300);
        let preview = content_preview(&long, 200);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_content_preview_multibyte_near_cutoff() {
        // A multibyte char straddling the cutoff must not split mid-char.
        let mut plot = "x".repeat(199);
        plot.push('é');
        plot.push_str(" and more cast names");

        let preview = content_preview(&plot, 200);
        assert!(preview.ends_with("é..."));
    }

    #[test]
    fn test_content_preview_flattens_newlines() {
        assert_eq!(content_preview("line one\nline two", 200), "line one line two");
    }
}

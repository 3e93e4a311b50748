//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::tools::{ToolHits, ToolOutcome};
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    model: Option<String>,
    show_tools: bool,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask) {
        Output::error(&format!("{}", e));
        Output::info("Run 'flick doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let mut manager = super::build_manager(&settings, model)?;

    let spinner = Output::spinner("Searching...");

    match manager.process_query(question).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if let Some(trailer) = &response.trailer {
                Output::header("Trailer");
                Output::video_hit(trailer);
            }

            if show_tools {
                print_tool_results(&response.tool_results);
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Print raw tool results for the --show-tools flag.
fn print_tool_results(results: &std::collections::HashMap<String, ToolOutcome>) {
    for slot in ["search", "movie", "youtube"] {
        let Some(outcome) = results.get(slot) else {
            continue;
        };

        Output::header(slot);
        match outcome {
            ToolOutcome::Failed { reason } => Output::warning(&format!("failed: {}", reason)),
            ToolOutcome::Ok { hits } if hits.is_empty() => Output::kv("results", "none"),
            ToolOutcome::Ok { hits } => match hits {
                ToolHits::Web(hits) => hits.iter().for_each(Output::web_hit),
                ToolHits::Movie(hits) => hits.iter().for_each(Output::movie_hit),
                ToolHits::Video(hits) => hits.iter().for_each(Output::video_hit),
            },
        }
    }
}

//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::{HistoryEntry, Role};
use crate::error::Result;
use crate::tools::ToolOutcome;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask) {
        Output::error(&format!("{}", e));
        Output::info("Run 'flick doctor' for detailed diagnostics.");
        return Err(e);
    }

    let mut manager = super::build_manager(&settings, model.clone())?;

    println!("\n{}", style("Flick Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask about any movie or show, or 'exit' to quit. Use 'clear' to reset conversation.")
            .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            // History is append-only, so a fresh session means a fresh manager.
            manager = super::build_manager(&settings, model.clone())?;
            Output::info("Conversation history cleared.");
            continue;
        }

        let cursor = manager.cursor();
        let spinner = Output::spinner("Searching...");

        match manager.process_query(input).await {
            Ok(response) => {
                spinner.finish_and_clear();
                render_activity(manager.entries_since(cursor));
                println!("\n{} {}\n", style("Flick:").cyan().bold(), response.answer);
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}

/// Show what happened behind the scenes for the last query.
fn render_activity(entries: &[HistoryEntry]) {
    for entry in entries {
        match entry {
            HistoryEntry::ToolCall { tool, outcome, .. } => {
                let status = match outcome {
                    ToolOutcome::Ok { hits } => format!("{} results", hits.len()),
                    ToolOutcome::Failed { .. } => "failed".to_string(),
                };
                println!("{}", style(format!("  [{}] {}", tool, status)).dim());
            }
            HistoryEntry::Message {
                role: Role::Assistant,
                content,
                ..
            } if content.starts_with("Here is the trailer") => {
                println!("{}", style(format!("  {}", content)).dim());
            }
            _ => {}
        }
    }
}

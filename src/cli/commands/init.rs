//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Flick Setup");
    println!();
    println!("Welcome to Flick! Let's make sure everything is configured correctly.\n");

    // Step 1: Check the required API key
    println!("{}", style("Step 1: Checking API configuration").bold().cyan());
    println!();

    if std::env::var("GROQ_API_KEY").is_err() {
        Output::warning("GROQ_API_KEY environment variable is not set.");
        println!();
        println!("  Flick requires a Groq API key to generate answers.");
        println!(
            "  Get your API key from: {}",
            style("https://console.groq.com/keys").underlined()
        );
        println!();
        println!("  Set it in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        println!("  {}", style("export GROQ_API_KEY='...'").green());
        println!();

        if !prompt_continue("Continue without API key?")? {
            println!();
            Output::info("Setup cancelled. Set your API key and run 'flick init' again.");
            return Ok(());
        }
    } else {
        Output::success("Groq API key is configured!");
    }

    println!();

    // Step 2: Optional search keys
    println!("{}", style("Step 2: Optional search backends").bold().cyan());
    println!();

    report_optional_key(
        "OMDB_API_KEY",
        "movie details (ratings, cast, plot)",
        "https://www.omdbapi.com/apikey.aspx",
    );
    report_optional_key(
        "YOUTUBE_API_KEY",
        "trailer lookup",
        "https://console.cloud.google.com/apis/library/youtube.googleapis.com",
    );

    println!();

    // Step 3: Create config file
    println!("{}", style("Step 3: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!("  Edit your config with: {}", style("flick config edit").green());
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check system status", style("flick doctor").cyan());
    println!(
        "  {} Ask about a movie",
        style("flick ask \"What is The Batman about?\"").cyan()
    );
    println!("  {} Start a conversation", style("flick chat").cyan());
    println!();
    println!("For more help: {}", style("flick --help").cyan());

    Ok(())
}

/// Report the state of an optional API key.
fn report_optional_key(name: &str, feature: &str, url: &str) {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => {
            Output::success(&format!("{} is configured ({})", name, feature));
        }
        _ => {
            Output::info(&format!("{} not set, {} will be skipped", name, feature));
            println!("    {} {}", style("→").dim(), style(url).dim());
        }
    }
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}

//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command.
///
/// `config_path` is the file the settings were loaded from (the global
/// `--config` flag), so edits land back in the same file.
pub fn run_config(
    action: &ConfigAction,
    mut settings: Settings,
    config_path: Option<&PathBuf>,
) -> Result<()> {
    let config_path = config_path
        .cloned()
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            set_value(&mut settings, key, value)?;
            settings.save_to(&config_path)?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Edit => {
            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save_to(&config_path)?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            // Try to open in editor
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment to settings.
fn set_value(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "general.log_level" => settings.general.log_level = value.to_string(),
        "search.web_provider" => {
            settings.search.web_provider =
                value.parse().map_err(|e: String| anyhow::anyhow!(e))?
        }
        "search.max_results" => settings.search.max_results = value.parse()?,
        "search.detail_limit" => settings.search.detail_limit = value.parse()?,
        "search.timeout_seconds" => settings.search.timeout_seconds = value.parse()?,
        "llm.model" => settings.llm.model = value.to_string(),
        "llm.api_base" => settings.llm.api_base = value.to_string(),
        "llm.max_tokens" => settings.llm.max_tokens = value.parse()?,
        "llm.temperature" => settings.llm.temperature = value.parse()?,
        "prompts.custom_dir" => settings.prompts.custom_dir = Some(value.to_string()),
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown config key: {} (see 'flick config show' for available keys)",
                key
            ))
        }
    }
    Ok(())
}

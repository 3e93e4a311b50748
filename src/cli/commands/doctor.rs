//! Doctor command - verify API keys, configuration, and search backends.

use crate::cli::Output;
use crate::config::Settings;
use crate::tools::available_tools;
use console::style;
use futures::future::join_all;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Flick Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    // Check API keys
    println!("{}", style("API Configuration").bold());
    checks.push(check_required_key(
        "GROQ_API_KEY",
        "https://console.groq.com/keys",
    ));
    checks.push(check_optional_key(
        "OMDB_API_KEY",
        "movie details lookup disabled",
        "Get a free key from: https://www.omdbapi.com/apikey.aspx",
    ));
    checks.push(check_optional_key(
        "YOUTUBE_API_KEY",
        "trailer search disabled",
        "Create a key in the Google Cloud console (YouTube Data API v3)",
    ));
    for check in &checks {
        check.print();
    }

    println!();

    // Probe the configured search backends concurrently
    println!("{}", style("Search Backends").bold());
    let backend_checks = probe_backends(settings).await;
    for check in &backend_checks {
        check.print();
    }
    checks.extend(backend_checks);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Flick.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Flick is ready to use.");
    }

    Ok(())
}

/// Check a key the assistant cannot run without.
fn check_required_key(name: &str, url: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => {
            let masked = mask_key(&key);
            CheckResult::ok(name, &format!("configured ({})", masked))
        }
        Ok(_) => CheckResult::error(
            name,
            "empty",
            &format!("Get a key from: {}", url),
        ),
        Err(_) => CheckResult::error(
            name,
            "not set",
            &format!("Get a key from: {}", url),
        ),
    }
}

/// Check a key whose absence only disables one tool.
fn check_optional_key(name: &str, consequence: &str, hint: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => {
            let masked = mask_key(&key);
            CheckResult::ok(name, &format!("configured ({})", masked))
        }
        _ => CheckResult::warning(name, &format!("not set, {}", consequence), hint),
    }
}

/// Mask an API key for display.
fn mask_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}

/// Probe each available search backend with a live query.
async fn probe_backends(settings: &Settings) -> Vec<CheckResult> {
    let tools = available_tools(settings);

    if tools.is_empty() {
        return vec![CheckResult::warning(
            "Search tools",
            "none configured",
            "Set OMDB_API_KEY and YOUTUBE_API_KEY to enable richer answers",
        )];
    }

    let probes = tools.iter().map(|tool| async move {
        match tool.search("the matrix").await {
            Ok(hits) => CheckResult::ok(tool.name(), &format!("reachable ({} results)", hits.len())),
            Err(e) => CheckResult::warning(
                tool.name(),
                &format!("probe failed: {}", e),
                "Check your network connection and API quota",
            ),
        }
    });

    join_all(probes).await
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: flick init (or flick config edit)",
        )
    }
}

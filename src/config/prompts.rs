//! Prompt templates for Flick.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub assistant: AssistantPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for the research assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantPrompts {
    pub system: String,
    pub context_preamble: String,
}

impl Default for AssistantPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful research assistant who can help users find information about movies, TV shows, and other topics.
When providing information about movies or shows, include IMDB ratings, release dates,
and other relevant details from the context if available.
Use today's date and use data from the context."#
                .to_string(),

            context_preamble: "Here is additional context from searches:".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = super::Settings::expand_path(dir);

            let assistant_path = custom_path.join("assistant.toml");
            if assistant_path.exists() {
                let content = std::fs::read_to_string(&assistant_path)?;
                prompts.assistant = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.assistant.system.is_empty());
        assert!(prompts.assistant.system.contains("IMDB"));
    }

    #[test]
    fn test_load_custom_assistant_override() {
        let dir = std::env::temp_dir().join(format!("flick-prompts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("assistant.toml"),
            "system = \"You are {{assistant_name}}.\"\n",
        )
        .unwrap();

        let mut vars = std::collections::HashMap::new();
        vars.insert("assistant_name".to_string(), "Flick".to_string());

        let prompts = Prompts::load(Some(dir.to_str().unwrap()), Some(&vars)).unwrap();
        assert_eq!(prompts.assistant.system, "You are {{assistant_name}}.");

        let rendered = prompts
            .render_with_custom(&prompts.assistant.system, &std::collections::HashMap::new());
        assert_eq!(rendered, "You are Flick.");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_render_template() {
        let template = "Question about {{title}} ({{year}}).";
        let mut vars = std::collections::HashMap::new();
        vars.insert("title".to_string(), "Heat".to_string());
        vars.insert("year".to_string(), "1995".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Question about Heat (1995).");
    }
}

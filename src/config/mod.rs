//! Configuration module for Flick.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AssistantPrompts, Prompts};
pub use settings::{
    GeneralSettings, LlmSettings, PromptSettings, SearchSettings, Settings, WebProvider,
};

//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod init;
mod mcp;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use init::run_init;
pub use mcp::run_mcp;
pub use serve::run_serve;

use crate::config::{Prompts, Settings};
use crate::conversation::ConversationManager;
use crate::error::Result;
use crate::llm::GroqChat;
use crate::tools::available_tools;
use std::sync::Arc;

/// Build a conversation manager from settings, with an optional model
/// override for this session.
pub(crate) fn build_manager(
    settings: &Settings,
    model: Option<String>,
) -> Result<ConversationManager> {
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let mut chat = GroqChat::from_env(&settings.llm, &prompts)?;
    if let Some(model) = model {
        chat = chat.with_model(&model);
    }

    let tools = available_tools(settings);

    Ok(ConversationManager::new(tools, Arc::new(chat)))
}

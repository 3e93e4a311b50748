//! Chat model client abstraction.

mod groq;

pub use groq::GroqChat;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for chat-completion model clients.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a reply to `prompt`, optionally grounded in search context.
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String>;

    /// Name of the underlying model.
    fn model(&self) -> &str;
}

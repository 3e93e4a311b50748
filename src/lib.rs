//! Flick - Movie and TV Research Assistant
//!
//! A CLI tool for asking natural-language questions about movies and shows.
//!
//! # Overview
//!
//! Flick lets you:
//! - Ask questions about movies and TV shows in plain language
//! - Pull ratings, cast, and plot details from the OMDB API
//! - Find trailers through the YouTube Data API
//! - Ground answers in live web search results
//!
//! Search results are merged into a context blob and handed to a hosted
//! chat-completion model (Groq) together with your question.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `tools` - Search tool adapters (DuckDuckGo, Google, OMDB, YouTube)
//! - `llm` - Chat model client abstraction
//! - `conversation` - History log, context building, and query orchestration
//! - `mcp` - MCP server for AI assistant integration
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use flick::config::{Prompts, Settings};
//! use flick::conversation::ConversationManager;
//! use flick::llm::GroqChat;
//! use flick::tools::available_tools;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let tools = available_tools(&settings);
//!     let llm = Arc::new(GroqChat::from_env(&settings.llm, &Prompts::default())?);
//!
//!     let mut manager = ConversationManager::new(tools, llm);
//!     let response = manager.process_query("The Batman").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod tools;

pub use error::{FlickError, Result};

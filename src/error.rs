//! Error types for Flick.

use thiserror::Error;

/// Library-level error type for Flick operations.
#[derive(Error, Debug)]
pub enum FlickError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search tool error: {0}")]
    Search(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Groq API error: {0}")]
    Groq(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Flick operations.
pub type Result<T> = std::result::Result<T, FlickError>;

//! Pre-flight checks before network-bound operations.
//!
//! Validates that required API keys are available before starting
//! operations that would otherwise fail midway.

use crate::error::{FlickError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Asking questions requires the chat API key.
    Ask,
    /// The HTTP server answers questions, so it has the same requirements.
    Serve,
    /// The MCP server answers questions, so it has the same requirements.
    Mcp,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
/// Optional search keys (OMDB, YouTube, Google) are not checked here; tools
/// without keys are simply skipped at startup.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Ask | Operation::Serve | Operation::Mcp => {
            check_api_key("GROQ_API_KEY")?;
        }
    }
    Ok(())
}

/// Check that an API key is set and non-empty.
fn check_api_key(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(FlickError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(FlickError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_reported() {
        let result = check_api_key("FLICK_TEST_KEY_THAT_DOES_NOT_EXIST");
        assert!(matches!(result, Err(FlickError::Config(_))));
    }
}

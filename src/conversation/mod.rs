//! Conversation history and query orchestration.
//!
//! One session is an append-only log of user messages, assistant messages,
//! and tool-call records. Entries are never mutated or removed; presentation
//! layers follow the log with a cursor instead of sharing mutable state.

pub mod context;
mod manager;

pub use manager::{ConversationManager, QueryResponse};

use crate::tools::ToolOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEntry {
    /// A user or assistant message.
    Message {
        role: Role,
        content: String,
        timestamp: DateTime<Utc>,
    },
    /// A recorded tool call with its query and outcome.
    ToolCall {
        tool: String,
        query: String,
        outcome: ToolOutcome,
        timestamp: DateTime<Utc>,
    },
}

/// Append-only conversation log with a cursor API for readers.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user or assistant message.
    pub fn push_message(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push(HistoryEntry::Message {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    /// Append a tool-call record.
    pub fn push_tool_call(&mut self, tool: &str, query: &str, outcome: ToolOutcome) {
        self.entries.push(HistoryEntry::ToolCall {
            tool: tool.to_string(),
            query: query.to_string(),
            outcome,
            timestamp: Utc::now(),
        });
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor past the last entry. Pass it back to `entries_since` later to
    /// read only what was appended in between.
    pub fn cursor(&self) -> usize {
        self.entries.len()
    }

    /// Entries appended since the given cursor.
    pub fn entries_since(&self, cursor: usize) -> &[HistoryEntry] {
        &self.entries[cursor.min(self.entries.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolHits, ToolOutcome};

    #[test]
    fn test_cursor_tracks_new_entries() {
        let mut history = History::new();
        history.push_message(Role::User, "hello");

        let cursor = history.cursor();
        assert!(history.entries_since(cursor).is_empty());

        history.push_tool_call(
            "OMDB Search",
            "heat",
            ToolOutcome::Ok {
                hits: ToolHits::Movie(Vec::new()),
            },
        );
        history.push_message(Role::Assistant, "hi");

        assert_eq!(history.entries_since(cursor).len(), 2);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_stale_cursor_is_clamped() {
        let history = History::new();
        assert!(history.entries_since(10).is_empty());
    }
}

//! Chat turn types for leadchat.
//!
//! A session has no record of its own: it is the set of turns sharing a
//! `session_id`, ordered by `created_at` ascending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Session id used when an inbound request does not carry one.
pub const DEFAULT_SESSION_ID: &str = "default_session";

/// Who authored a turn.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message written to the chat log.
///
/// Immutable once written. Turns are never updated or deleted by the chat
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub session_id: String,
    pub role: TurnRole,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a turn stamped with the current time and a fresh v7 id.
    pub fn new(session_id: impl Into<String>, role: TurnRole, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id: session_id.into(),
            role,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// The slice of a turn the prompt builder needs: role and text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: TurnRole,
    pub message: String,
}

impl From<ChatTurn> for HistoryEntry {
    fn from(turn: ChatTurn) -> Self {
        Self {
            role: turn.role,
            message: turn.message,
        }
    }
}

/// Inbound chat request as received from the widget.
///
/// Both fields are optional on the wire and defaulted, never rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The session id, or [`DEFAULT_SESSION_ID`] when absent.
    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or(DEFAULT_SESSION_ID)
    }

    /// The message text, or the empty string when absent.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Outbound chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_rejects_unknown() {
        let err = "system".parse::<TurnRole>().unwrap_err();
        assert!(err.contains("system"));
    }

    #[test]
    fn test_turn_role_serde() {
        let json = serde_json::to_string(&TurnRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_chat_request_defaults() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.session_id(), "default_session");
        assert_eq!(req.message(), "");
    }

    #[test]
    fn test_chat_request_values() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"session_id":"s1","message":"Hi"}"#).unwrap();
        assert_eq!(req.session_id(), "s1");
        assert_eq!(req.message(), "Hi");
    }

    #[test]
    fn test_history_entry_from_turn() {
        let turn = ChatTurn::new("s1", TurnRole::User, "Hello");
        let entry = HistoryEntry::from(turn);
        assert_eq!(entry.role, TurnRole::User);
        assert_eq!(entry.message, "Hello");
    }
}

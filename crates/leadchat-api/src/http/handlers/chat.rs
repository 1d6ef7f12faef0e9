//! Chat HTTP handler.
//!
//! Endpoint:
//! - POST /api/chat - run one message through the pipeline
//!
//! The body is read leniently: a missing or malformed body, a non-object
//! body, or fields of the wrong type all fall back to the defaults
//! (`default_session`, empty message). The endpoint never rejects a request.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use leadchat_types::chat::{ChatRequest, ChatResponse};

use crate::state::AppState;

/// POST /api/chat
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let request = parse_lenient(&body);
    let reply = state.pipeline.handle(&request).await;
    Json(ChatResponse {
        response: reply.response,
    })
}

/// Pull `session_id` and `message` out of whatever JSON arrived.
fn parse_lenient(body: &[u8]) -> ChatRequest {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            if !body.is_empty() {
                tracing::warn!(error = %e, "Malformed chat request body, using defaults");
            }
            Value::Null
        }
    };

    let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

    ChatRequest {
        session_id: field("session_id"),
        message: field("message"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_fields() {
        let request = parse_lenient(br#"{"session_id":"s1","message":"hi"}"#);
        assert_eq!(request.session_id(), "s1");
        assert_eq!(request.message(), "hi");
    }

    #[test]
    fn missing_fields_default() {
        let request = parse_lenient(b"{}");
        assert_eq!(request.session_id(), "default_session");
        assert_eq!(request.message(), "");
    }

    #[test]
    fn malformed_json_defaults() {
        let request = parse_lenient(b"{not json");
        assert_eq!(request.session_id(), "default_session");
        assert_eq!(request.message(), "");
    }

    #[test]
    fn wrong_types_default_per_field() {
        let request = parse_lenient(br#"{"session_id":42,"message":"hello"}"#);
        assert_eq!(request.session_id(), "default_session");
        assert_eq!(request.message(), "hello");
    }

    #[test]
    fn empty_body_defaults() {
        let request = parse_lenient(b"");
        assert_eq!(request.session_id(), "default_session");
    }
}

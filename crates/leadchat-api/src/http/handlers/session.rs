//! Session history HTTP handler.
//!
//! Endpoint:
//! - GET /api/sessions/{session_id}/history - stored turns, oldest first

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use leadchat_types::chat::{ChatTurn, TurnRole};

use crate::http::error::AppError;
use crate::state::AppState;

/// One turn as shown to the widget.
#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub role: TurnRole,
    pub message: String,
    pub timestamp: String,
}

impl From<ChatTurn> for HistoryItem {
    fn from(turn: ChatTurn) -> Self {
        Self {
            role: turn.role,
            message: turn.message,
            timestamp: turn.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/sessions/{session_id}/history
///
/// Any id `POST /api/chat` accepts can be read back here; an unknown session
/// yields an empty list.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HistoryItem>>, AppError> {
    let turns = state.pipeline.history(&session_id).await?;
    Ok(Json(turns.into_iter().map(HistoryItem::from).collect()))
}

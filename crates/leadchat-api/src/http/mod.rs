//! HTTP API layer for leadchat.
//!
//! Axum-based API under `/api/` for the chat widget, plus `/health` and an
//! optional static directory holding the widget itself.

pub mod error;
pub mod handlers;
pub mod router;

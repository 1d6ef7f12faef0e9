//! Infrastructure layer for leadchat.
//!
//! Contains implementations of the ports defined in `leadchat-core`:
//! SQLite storage for turns and leads, the OpenAI-compatible model provider,
//! lead notifiers (SMTP, webhook, log), and configuration loading.

pub mod config;
pub mod llm;
pub mod notify;
pub mod sqlite;

//! Shared domain types for leadchat.
//!
//! This crate contains the core domain types used across the chat backend:
//! chat turns, contact leads, LLM request/response shapes, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, secrecy.

pub mod chat;
pub mod config;
pub mod error;
pub mod lead;
pub mod llm;

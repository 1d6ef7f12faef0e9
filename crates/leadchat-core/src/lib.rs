//! Chat pipeline logic and repository trait definitions for leadchat.
//!
//! This crate defines the "ports" (repository, provider, and notifier traits)
//! that the infrastructure layer implements, plus the per-request pipeline:
//! load history, build the prompt, complete, then detect and capture leads.
//! It depends only on `leadchat-types` -- never on `leadchat-infra` or any
//! database/IO crate.

pub mod chat;
pub mod lead;
pub mod llm;

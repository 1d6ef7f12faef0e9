//! LLM provider abstractions for leadchat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `CompletionClient`: prompt-in, text-out wrapper that never fails

pub mod box_provider;
pub mod completion;
pub mod provider;

//! Chat history and prompt assembly.
//!
//! - `repository`: the `ChatRepository` port for the turn log
//! - `history`: loads a session's prior turns, oldest first
//! - `context`: renders the instruction preamble and the bounded prompt
//! - `pipeline`: the per-request chat flow tying everything together

pub mod context;
pub mod history;
pub mod pipeline;
pub mod repository;

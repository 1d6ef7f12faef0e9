//! Prompt assembly: instruction preamble plus a bounded transcript.
//!
//! The whole conversation is flattened into one prompt string:
//!
//! ```text
//! <preamble>
//!
//! Chat history:
//! user: ...
//! assistant: ...
//! user: <new message>
//! ```
//!
//! The `Chat history:` block is omitted when no turns survive truncation.
//! Message text is never truncated; only the number of turns is bounded.

use std::fmt::Write as _;

use leadchat_types::chat::{HistoryEntry, TurnRole};
use leadchat_types::config::ChatConfig;

/// Render the fixed instruction preamble from chat settings.
///
/// Embeds the company name, the off-topic reply, and the contact prompt the
/// model is told to use. The contact prompt doubles as the lead trigger.
pub fn render_preamble(config: &ChatConfig) -> String {
    format!(
        "You are a customer service chatbot for {company}. Your role is to:\n\
         1. Answer questions about the company, its services, and job vacancies\n\
         2. Politely decline to answer questions not related to the company\n\
         3. Ask for contact information when appropriate\n\
         \n\
         Guidelines:\n\
         - Keep responses professional and friendly\n\
         - For off-topic questions, respond with: \"{off_topic}\"\n\
         - When appropriate, ask: \"{contact}\"\n\
         - Never make up information",
        company = config.company_name,
        off_topic = config.off_topic_response,
        contact = config.contact_prompt,
    )
}

/// Builds prompt strings from a preamble and a trailing window of turns.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    preamble: String,
    max_history: usize,
}

impl ContextBuilder {
    pub fn new(preamble: impl Into<String>, max_history: usize) -> Self {
        Self {
            preamble: preamble.into(),
            max_history,
        }
    }

    /// Build a builder whose preamble is rendered from `config`.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(render_preamble(config), config.max_history)
    }

    /// Assemble the prompt for `message` given the session's ordered history.
    ///
    /// Only the last `max_history` entries are included, in original order.
    pub fn build(&self, history: &[HistoryEntry], message: &str) -> String {
        let window = trailing(history, self.max_history);

        let mut prompt = String::with_capacity(
            self.preamble.len()
                + message.len()
                + window.iter().map(|e| e.message.len() + 12).sum::<usize>()
                + 32,
        );
        prompt.push_str(&self.preamble);
        prompt.push_str("\n\n");

        if !window.is_empty() {
            prompt.push_str("Chat history:\n");
            for entry in window {
                // Writing to a String cannot fail.
                let _ = writeln!(prompt, "{}: {}", entry.role, entry.message);
            }
        }

        let _ = write!(prompt, "{}: {}", TurnRole::User, message);
        prompt
    }
}

/// The last `max` entries of `history` (all of them when shorter).
fn trailing(history: &[HistoryEntry], max: usize) -> &[HistoryEntry] {
    &history[history.len().saturating_sub(max)..]
}

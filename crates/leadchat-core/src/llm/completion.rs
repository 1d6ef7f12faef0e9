//! Prompt-in, text-out completion with a fixed fallback reply.
//!
//! The chat pipeline must always produce some reply text, so every provider
//! failure (network, auth, quota, malformed or empty response) is logged and
//! replaced with [`FALLBACK_REPLY`]. Nothing is propagated to the caller.

use tracing::{Instrument, debug, error, info_span};

use leadchat_types::llm::{CompletionRequest, LlmError};

use super::box_provider::BoxLlmProvider;

/// User-facing reply when the model cannot be reached.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble processing your request. Please try again later.";

/// Sends assembled prompts to the model service.
pub struct CompletionClient {
    provider: BoxLlmProvider,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider) -> Self {
        Self { provider }
    }

    /// Complete `prompt`, returning the model's text or the fallback reply.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.try_complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    error = %e,
                    "Completion failed, returning fallback reply"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Complete `prompt`, surfacing provider errors.
    ///
    /// A response with no text counts as a failure.
    pub async fn try_complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = CompletionRequest::from_prompt(prompt);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = "chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = self.provider.model(),
            gen_ai.prompt.chars = prompt.len(),
        );

        let response = self.provider.complete(&request).instrument(span).await?;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyCompletion);
        }

        debug!(
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Completion received"
        );

        Ok(response.content)
    }
}

//! Model provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `leadchat-core` and a factory ([`create_provider`]) that
//! builds it from [`ModelConfig`].
//!
//! [`LlmProvider`]: leadchat_core::llm::provider::LlmProvider

pub mod openai_compat;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use leadchat_core::llm::box_provider::BoxLlmProvider;
use leadchat_types::config::ModelConfig;
use leadchat_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{self as presets, OpenAiCompatConfig};

/// Create a [`BoxLlmProvider`] from a [`ModelConfig`].
///
/// `base_url` wins over the preset named by `provider`; unknown preset names
/// without a base URL fall back to Gemini. A missing API key is not an error
/// here: the service rejects the call and the caller's fallback reply kicks in.
pub fn create_provider(config: &ModelConfig) -> Result<BoxLlmProvider, LlmError> {
    let api_key = match &config.api_key {
        Some(key) => SecretString::from(key.expose_secret().to_string()),
        None => {
            warn!(provider = %config.provider, "No model API key configured; completions will fail");
            SecretString::from(String::new())
        }
    };

    let mut oai_config = resolve_config(config, api_key);
    oai_config.timeout = Duration::from_secs(config.timeout_secs);

    info!(
        provider = %oai_config.provider_name,
        model = %oai_config.model,
        base_url = %oai_config.base_url,
        timeout_secs = config.timeout_secs,
        "Model provider configured"
    );

    let provider = OpenAiCompatibleProvider::new(oai_config)?;
    Ok(BoxLlmProvider::new(provider))
}

fn resolve_config(config: &ModelConfig, api_key: SecretString) -> OpenAiCompatConfig {
    match config.base_url.as_deref() {
        Some(base_url) => presets::custom(&config.provider, base_url, api_key, &config.model),
        None => match config.provider.as_str() {
            "openai" => presets::openai_defaults(api_key, &config.model),
            "gemini" => presets::gemini_defaults(api_key, &config.model),
            other => {
                warn!(provider = other, "Unknown provider preset, using gemini endpoint");
                presets::gemini_defaults(api_key, &config.model)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("k".to_string())
    }

    #[test]
    fn test_default_config_is_gemini() {
        let resolved = resolve_config(&ModelConfig::default(), key());
        assert_eq!(resolved.provider_name, "gemini");
        assert_eq!(resolved.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_base_url_overrides_preset() {
        let config = ModelConfig {
            provider: "local".to_string(),
            base_url: Some("http://localhost:11434/v1".to_string()),
            ..Default::default()
        };
        let resolved = resolve_config(&config, key());
        assert_eq!(resolved.provider_name, "local");
        assert_eq!(resolved.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn test_openai_preset() {
        let config = ModelConfig {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_config(&config, key()).base_url,
            "https://api.openai.com/v1"
        );
    }

    #[test]
    fn test_create_provider_without_key() {
        let provider = create_provider(&ModelConfig::default()).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-2.0-flash");
    }
}

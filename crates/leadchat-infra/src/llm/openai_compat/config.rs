//! Configuration types and per-provider defaults for OpenAI-compatible providers.
//!
//! Each hosted service that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with the correct base
//! URL.

use std::time::Duration;

use secrecy::SecretString;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for an OpenAI-compatible model provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "gemini", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Upper bound on one completion round trip.
    pub timeout: Duration,
}

/// Google Gemini default configuration (OpenAI-compatible beta endpoint).
///
/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        api_key,
        model: model.into(),
        timeout: DEFAULT_TIMEOUT,
    }
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
        timeout: DEFAULT_TIMEOUT,
    }
}

/// Any other OpenAI-compatible endpoint (self-hosted gateways, proxies).
pub fn custom(
    provider_name: &str,
    base_url: &str,
    api_key: SecretString,
    model: &str,
) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url: base_url.trim_end_matches('/').into(),
        api_key,
        model: model.into(),
        timeout: DEFAULT_TIMEOUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_gemini_defaults() {
        let config = gemini_defaults(SecretString::from("g-key".to_string()), "gemini-2.0-flash");
        assert_eq!(config.provider_name, "gemini");
        assert!(config.base_url.contains("generativelanguage.googleapis.com"));
        assert_eq!(config.api_key.expose_secret(), "g-key");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(SecretString::from("sk".to_string()), "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.provider_name, "openai");
    }

    #[test]
    fn test_custom_strips_trailing_slash() {
        let config = custom("local", "http://localhost:8080/v1/", SecretString::from("x".to_string()), "m");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.provider_name, "local");
    }
}

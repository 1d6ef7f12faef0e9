//! Application configuration loader for leadchat.
//!
//! Builds an [`AppConfig`] in layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`--config` or `LEADCHAT_CONFIG`)
//! 3. a `.env` file in the working directory, if present
//! 4. process environment variables
//!
//! Environment variables that are set but empty are ignored. A value that
//! cannot be parsed (e.g. `MAX_CHAT_HISTORY=lots`) is a startup error, as is
//! an empty contact prompt, since it is also the lead-capture trigger.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use leadchat_types::config::{AppConfig, Environment};
use leadchat_types::error::ConfigError;

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "LEADCHAT_CONFIG";

/// Load the full configuration from the process environment.
///
/// `explicit_path` (from the command line) takes precedence over
/// `LEADCHAT_CONFIG`. A named file that is missing or malformed is an error;
/// with no file named, defaults are used.
pub async fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("Failed to read .env: {err}"),
    }

    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(|| non_empty_env(CONFIG_PATH_ENV).map(PathBuf::from));

    let mut config = match path {
        Some(path) => load_file(&path).await?,
        None => {
            tracing::debug!("No config file given, using defaults");
            AppConfig::default()
        }
    };

    apply_env_overrides(&mut config, non_empty_env)?;
    validate(&config)?;
    Ok(config)
}

/// Reject settings that would silently disable part of the service.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.chat.contact_prompt.trim().is_empty() {
        return Err(invalid("chat.contact_prompt", &config.chat.contact_prompt));
    }
    Ok(())
}

/// Read and parse a TOML config file.
pub async fn load_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

    toml::from_str::<AppConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value for a variable name, or `None` when unset.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("APP_ENV") {
        config.environment = v.parse::<Environment>().map_err(|_| invalid("APP_ENV", &v))?;
    }
    if let Some(v) = lookup("DEBUG") {
        config.debug = parse_bool("DEBUG", &v)?;
    }

    if let Some(v) = lookup("MAX_CHAT_HISTORY") {
        config.chat.max_history = parse_number("MAX_CHAT_HISTORY", &v)?;
    }
    if let Some(v) = lookup("OFF_TOPIC_RESPONSE") {
        config.chat.off_topic_response = v;
    }
    if let Some(v) = lookup("CONTACT_PROMPT") {
        config.chat.contact_prompt = v;
    }
    if let Some(v) = lookup("COMPANY_NAME") {
        config.chat.company_name = v;
    }

    if let Some(v) = lookup("MODEL_API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
        config.model.api_key = Some(SecretString::from(v));
    }
    if let Some(v) = lookup("MODEL_PROVIDER") {
        config.model.provider = v;
    }
    if let Some(v) = lookup("MODEL_NAME") {
        config.model.model = v;
    }
    if let Some(v) = lookup("MODEL_BASE_URL") {
        config.model.base_url = Some(v);
    }
    if let Some(v) = lookup("MODEL_TIMEOUT_SECS") {
        config.model.timeout_secs = parse_number("MODEL_TIMEOUT_SECS", &v)?;
    }

    if let Some(v) = lookup("DATABASE_URL") {
        config.database.url = v;
    }

    if let Some(v) = lookup("EMAIL_HOST") {
        config.mail.smtp_host = Some(v);
    }
    if let Some(v) = lookup("EMAIL_PORT") {
        config.mail.smtp_port = parse_number("EMAIL_PORT", &v)?;
    }
    if let Some(v) = lookup("EMAIL_USER") {
        config.mail.username = Some(v);
    }
    if let Some(v) = lookup("EMAIL_PASS") {
        config.mail.password = Some(SecretString::from(v));
    }
    if let Some(v) = lookup("EMAIL_FROM") {
        config.mail.from = Some(v);
    }
    if let Some(v) = lookup("RECIPIENT_EMAIL") {
        config.mail.recipient = Some(v);
    }

    if let Some(v) = lookup("WEBHOOK_URL") {
        config.webhook.url = Some(v);
    }

    if let Some(v) = lookup("HOST") {
        config.server.host = v;
    }
    if let Some(v) = lookup("PORT") {
        config.server.port = parse_number("PORT", &v)?;
    }
    if let Some(v) = lookup("WEB_DIR") {
        config.server.web_dir = v;
    }

    Ok(())
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_file_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("leadchat.toml");
        tokio::fs::write(
            &path,
            r#"
environment = "production"

[chat]
max_history = 4
company_name = "Acme"

[server]
port = 8080
"#,
        )
        .await
        .unwrap();

        let config = load_file(&path).await.unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.chat.max_history, 4);
        assert_eq!(config.chat.company_name, "Acme");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mail.smtp_port, 587);
    }

    #[tokio::test]
    async fn load_file_missing_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_file(&tmp.path().join("absent.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn load_file_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_chat_and_model_settings() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("MAX_CHAT_HISTORY", "3"),
                ("OFF_TOPIC_RESPONSE", "Off topic."),
                ("CONTACT_PROMPT", "May I have your details?"),
                ("GEMINI_API_KEY", "g-key"),
                ("MODEL_NAME", "gemini-1.5-flash"),
                ("DATABASE_URL", "sqlite::memory:"),
            ]),
        )
        .unwrap();

        assert_eq!(config.chat.max_history, 3);
        assert_eq!(config.chat.off_topic_response, "Off topic.");
        assert_eq!(config.chat.contact_prompt, "May I have your details?");
        assert_eq!(
            config.model.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("g-key".to_string())
        );
        assert_eq!(config.model.model, "gemini-1.5-flash");
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn model_api_key_wins_over_gemini_key() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("GEMINI_API_KEY", "g"), ("MODEL_API_KEY", "m")]),
        )
        .unwrap();
        assert_eq!(config.model.api_key.unwrap().expose_secret(), "m");
    }

    #[test]
    fn env_overrides_mail_settings() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("EMAIL_HOST", "smtp.example.com"),
                ("EMAIL_PORT", "2525"),
                ("EMAIL_USER", "bot@example.com"),
                ("EMAIL_PASS", "pw"),
                ("RECIPIENT_EMAIL", "sales@example.com"),
            ]),
        )
        .unwrap();

        assert!(config.mail.is_configured());
        assert_eq!(config.mail.smtp_port, 2525);
        assert_eq!(config.mail.sender(), Some("bot@example.com"));
    }

    #[test]
    fn unparseable_number_is_invalid_value() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("MAX_CHAT_HISTORY", "lots")]))
            .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { key, value } if key == "MAX_CHAT_HISTORY" && value == "lots")
        );
    }

    #[test]
    fn environment_and_debug_flags() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, env(&[("APP_ENV", "production")])).unwrap();
        assert!(!config.is_debug());

        apply_env_overrides(&mut config, env(&[("DEBUG", "true")])).unwrap();
        assert!(config.is_debug());

        let err = apply_env_overrides(&mut config, env(&[("DEBUG", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn empty_contact_prompt_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("leadchat.toml");
        tokio::fs::write(&path, "[chat]\ncontact_prompt = \"  \"\n")
            .await
            .unwrap();

        let config = load_file(&path).await.unwrap();
        let err = validate(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "chat.contact_prompt")
        );
    }

    #[test]
    fn no_env_leaves_defaults() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.chat.max_history, 10);
        assert!(config.model.api_key.is_none());
        assert!(config.webhook.url.is_none());
    }
}

//! Configuration types for leadchat.
//!
//! `AppConfig` is built once at startup (defaults, optional TOML file, then
//! environment overrides; see `leadchat_infra::config`) and passed by
//! reference into everything that needs it. All fields have defaults.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use std::fmt;
use std::str::FromStr;

/// Deployment environment. Development turns on debug logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("invalid environment: '{other}'")),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Force debug logging regardless of environment.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Whether debug-level logging should be on by default.
    pub fn is_debug(&self) -> bool {
        self.debug || self.environment == Environment::Development
    }
}

/// Read a plain string and wrap it so it never shows up in `Debug` output.
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(SecretString::from))
}

/// Prompt and history settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of trailing turns included in the prompt.
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Reply the model is told to give for off-topic questions.
    #[serde(default = "default_off_topic_response")]
    pub off_topic_response: String,

    /// Phrase the model is told to use when asking for contact details.
    /// The same phrase is the trigger for lead detection.
    #[serde(default = "default_contact_prompt")]
    pub contact_prompt: String,
}

fn default_max_history() -> usize {
    10
}

fn default_company_name() -> String {
    "Sattva Tech".to_string()
}

fn default_off_topic_response() -> String {
    "I'm sorry, I can only help with questions about our company, its services, and job openings."
        .to_string()
}

fn default_contact_prompt() -> String {
    "Would you like to share your contact information so our team can follow up?".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            company_name: default_company_name(),
            off_topic_response: default_off_topic_response(),
            contact_prompt: default_contact_prompt(),
        }
    }
}

/// Hosted model settings.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Provider preset name ("gemini", "openai"); selects the default base URL.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Override the preset's base URL (any OpenAI-compatible endpoint).
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: None,
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Store address used when neither the config file nor `DATABASE_URL` sets one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://leadchat.db?mode=rwc";

/// Chat log and lead store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// SMTP settings for lead notification mail.
#[derive(Debug, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub smtp_host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,

    /// Sender address; falls back to `username`.
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub recipient: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from: None,
            recipient: None,
        }
    }
}

impl MailConfig {
    /// Mail is usable once a relay host, a sender, and a recipient are known.
    pub fn is_configured(&self) -> bool {
        self.smtp_host.is_some() && self.sender().is_some() && self.recipient.is_some()
    }

    /// The `From:` address.
    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref().or(self.username.as_deref())
    }
}

/// Optional HTTP webhook receiving captured leads as JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the chat widget's static files; skipped if missing.
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_web_dir() -> String {
    "web".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

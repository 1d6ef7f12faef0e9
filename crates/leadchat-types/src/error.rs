use thiserror::Error;

/// Errors from repository operations (used by trait definitions in leadchat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from lead notification sinks (mail, webhook).
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier not configured: {0}")]
    NotConfigured(String),

    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("message build error: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors raised while assembling the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_notify_error_display() {
        let err = NotifyError::InvalidAddress {
            address: "nope".to_string(),
            reason: "missing @".to_string(),
        };
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains("missing @"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "MAX_CHAT_HISTORY".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for MAX_CHAT_HISTORY: 'ten'");
    }
}

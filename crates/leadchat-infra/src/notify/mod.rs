//! Lead notification sinks and the startup selection between them.
//!
//! Every configured sink receives every lead: SMTP when a relay, sender, and
//! recipient are set; the webhook when a URL is set. With neither, leads are
//! only logged.

pub mod log;
pub mod smtp;
pub mod webhook;

use tracing::{info, warn};

use leadchat_core::lead::notifier::{BoxLeadNotifier, LeadNotifier};
use leadchat_types::config::AppConfig;
use leadchat_types::error::NotifyError;
use leadchat_types::lead::ContactLead;

use self::log::LogNotifier;
use self::smtp::SmtpNotifier;
use self::webhook::WebhookNotifier;

/// Delivers to several sinks in turn.
///
/// Every sink is attempted even if an earlier one fails; the first error is
/// returned after all have run.
pub struct FanoutNotifier {
    sinks: Vec<BoxLeadNotifier>,
}

impl FanoutNotifier {
    pub fn new(sinks: Vec<BoxLeadNotifier>) -> Self {
        Self { sinks }
    }
}

impl LeadNotifier for FanoutNotifier {
    fn name(&self) -> &str {
        "fanout"
    }

    async fn notify(&self, lead: &ContactLead) -> Result<(), NotifyError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.notify(lead).await {
                warn!(notifier = sink.name(), lead_id = %lead.id, error = %e, "Lead notifier failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Build the notifier for this deployment.
///
/// A sink that is configured but cannot be built (bad address, bad URL) is
/// skipped with a warning so the chat service still starts.
pub fn build_notifier(config: &AppConfig) -> BoxLeadNotifier {
    let mut sinks = Vec::new();

    if config.mail.is_configured() {
        match SmtpNotifier::from_config(&config.mail) {
            Ok(smtp) => sinks.push(BoxLeadNotifier::new(smtp)),
            Err(e) => warn!(error = %e, "SMTP notifier disabled"),
        }
    }

    if let Some(url) = &config.webhook.url {
        match WebhookNotifier::new(url.as_str()) {
            Ok(webhook) => sinks.push(BoxLeadNotifier::new(webhook)),
            Err(e) => warn!(error = %e, "Webhook notifier disabled"),
        }
    }

    match sinks.len() {
        0 => {
            info!("No lead notifier configured, leads will be logged only");
            BoxLeadNotifier::new(LogNotifier)
        }
        1 => sinks.remove(0),
        _ => BoxLeadNotifier::new(FanoutNotifier::new(sinks)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadchat_types::lead::ContactInfo;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotifier {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl LeadNotifier for CountingNotifier {
        fn name(&self) -> &str {
            "counting"
        }

        async fn notify(&self, _lead: &ContactLead) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::Transport("down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn lead() -> ContactLead {
        ContactLead::new("s1", ContactInfo::default(), "From chat")
    }

    #[test]
    fn test_default_config_logs_only() {
        let notifier = build_notifier(&AppConfig::default());
        assert_eq!(notifier.name(), "log");
    }

    #[test]
    fn test_webhook_selected_when_url_set() {
        let mut config = AppConfig::default();
        config.webhook.url = Some("http://localhost:9999/hook".to_string());
        assert_eq!(build_notifier(&config).name(), "webhook");
    }

    #[test]
    fn test_bad_webhook_url_falls_back_to_log() {
        let mut config = AppConfig::default();
        config.webhook.url = Some("::nope::".to_string());
        assert_eq!(build_notifier(&config).name(), "log");
    }

    #[tokio::test]
    async fn test_fanout_runs_every_sink_and_reports_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fanout = FanoutNotifier::new(vec![
            BoxLeadNotifier::new(CountingNotifier {
                calls: Arc::clone(&calls),
                fail: true,
            }),
            BoxLeadNotifier::new(CountingNotifier {
                calls: Arc::clone(&calls),
                fail: false,
            }),
        ]);

        let result = fanout.notify(&lead()).await;

        assert!(matches!(result, Err(NotifyError::Transport(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_log_notifier_succeeds() {
        assert!(LogNotifier.notify(&lead()).await.is_ok());
    }
}

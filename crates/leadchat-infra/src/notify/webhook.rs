//! Webhook lead notifier: POSTs each captured lead as JSON.
//!
//! Body shape: `{"event": "lead.captured", "lead": {...}}`.

use std::time::Duration;

use leadchat_core::lead::notifier::LeadNotifier;
use leadchat_types::error::NotifyError;
use leadchat_types::lead::ContactLead;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);
const EVENT_NAME: &str = "lead.captured";

pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let url = url.into();
        reqwest::Url::parse(&url).map_err(|e| NotifyError::InvalidAddress {
            address: url.clone(),
            reason: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LeadNotifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(&self, lead: &ContactLead) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "event": EVENT_NAME,
            "lead": lead,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Transport(format!(
                "webhook returned HTTP {status}"
            )));
        }

        Ok(())
    }
}

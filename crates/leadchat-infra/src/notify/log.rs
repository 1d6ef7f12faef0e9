//! Log-only lead notifier, used when no mail relay or webhook is configured.

use tracing::info;

use leadchat_core::lead::notifier::LeadNotifier;
use leadchat_types::error::NotifyError;
use leadchat_types::lead::ContactLead;

#[derive(Debug, Default)]
pub struct LogNotifier;

impl LeadNotifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, lead: &ContactLead) -> Result<(), NotifyError> {
        info!(
            lead_id = %lead.id,
            session_id = %lead.session_id,
            name = lead.name.as_deref().unwrap_or("-"),
            email = lead.email.as_deref().unwrap_or("-"),
            phone = lead.phone.as_deref().unwrap_or("-"),
            interest = %lead.interest,
            "New lead captured (no notifier configured)"
        );
        Ok(())
    }
}

//! LeadNotifier trait and its object-safe wrapper.
//!
//! Notification is fire-and-forget from the pipeline's point of view: a
//! failure is logged by the caller and never affects the stored lead.

use std::future::Future;
use std::pin::Pin;

use leadchat_types::error::NotifyError;
use leadchat_types::lead::ContactLead;

/// A sink that tells humans about a newly captured lead (mail, webhook, log).
pub trait LeadNotifier: Send + Sync {
    /// Short name for logs (e.g., "smtp", "webhook").
    fn name(&self) -> &str;

    /// Deliver a notification for `lead`.
    fn notify(
        &self,
        lead: &ContactLead,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Object-safe version of [`LeadNotifier`] with boxed futures.
pub trait LeadNotifierDyn: Send + Sync {
    fn name(&self) -> &str;

    fn notify_boxed<'a>(
        &'a self,
        lead: &'a ContactLead,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>>;
}

impl<T: LeadNotifier> LeadNotifierDyn for T {
    fn name(&self) -> &str {
        LeadNotifier::name(self)
    }

    fn notify_boxed<'a>(
        &'a self,
        lead: &'a ContactLead,
    ) -> Pin<Box<dyn Future<Output = Result<(), NotifyError>> + Send + 'a>> {
        Box::pin(self.notify(lead))
    }
}

/// Type-erased notifier, selected at startup from configuration.
pub struct BoxLeadNotifier {
    inner: Box<dyn LeadNotifierDyn + Send + Sync>,
}

impl BoxLeadNotifier {
    pub fn new<T: LeadNotifier + 'static>(notifier: T) -> Self {
        Self {
            inner: Box::new(notifier),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn notify(&self, lead: &ContactLead) -> Result<(), NotifyError> {
        self.inner.notify_boxed(lead).await
    }
}

//! LeadRepository trait definition.

use leadchat_types::error::RepositoryError;
use leadchat_types::lead::ContactLead;

/// Repository trait for captured leads.
///
/// Insert-only from the chat pipeline's point of view: every capture is a
/// new record, never an upsert.
pub trait LeadRepository: Send + Sync {
    /// Persist a newly captured lead.
    fn save_lead(
        &self,
        lead: &ContactLead,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List leads captured in a session, ordered by created_at ASC.
    fn list_leads(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ContactLead>, RepositoryError>> + Send;
}

//! The per-request chat pipeline.
//!
//! `handle` always reaches a terminal state and always returns reply text:
//! store and notification failures are logged, model failures become the
//! fallback reply. Steps run in a fixed order:
//!
//! 1. load prior turns for the session
//! 2. record the user turn
//! 3. build the prompt and complete it
//! 4. record the assistant turn
//! 5. detect a contact request and extract contact details
//! 6. persist the lead and notify, independently of each other

use tracing::{Instrument, debug, info, info_span, warn};

use leadchat_types::chat::{ChatRequest, ChatTurn, HistoryEntry, TurnRole};
use leadchat_types::error::RepositoryError;
use leadchat_types::lead::ContactLead;

use super::context::ContextBuilder;
use super::history::load_history;
use super::repository::ChatRepository;
use crate::lead::notifier::BoxLeadNotifier;
use crate::lead::repository::LeadRepository;
use crate::lead::rules::LeadRules;
use crate::llm::completion::CompletionClient;

/// What lead capture concluded for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum LeadOutcome {
    /// The reply did not ask for contact details, or the message had no keyword.
    NotRequested,
    /// Contact details were requested but no marker lines were found.
    NoContactInfo,
    /// A lead was built; persistence and notification were attempted.
    Captured(ContactLead),
}

impl LeadOutcome {
    pub fn lead(&self) -> Option<&ContactLead> {
        match self {
            Self::Captured(lead) => Some(lead),
            _ => None,
        }
    }
}

/// Result of handling one chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Text returned to the caller, including any acknowledgement suffix.
    pub response: String,
    pub outcome: LeadOutcome,
}

/// Orchestrates history, prompt assembly, completion, and lead capture.
pub struct ChatPipeline<C: ChatRepository, L: LeadRepository> {
    chats: C,
    leads: L,
    context: ContextBuilder,
    client: CompletionClient,
    rules: LeadRules,
    notifier: BoxLeadNotifier,
}

impl<C: ChatRepository, L: LeadRepository> ChatPipeline<C, L> {
    pub fn new(
        chats: C,
        leads: L,
        context: ContextBuilder,
        client: CompletionClient,
        rules: LeadRules,
        notifier: BoxLeadNotifier,
    ) -> Self {
        Self {
            chats,
            leads,
            context,
            client,
            rules,
            notifier,
        }
    }

    /// The lead store, for listing captured leads.
    pub fn leads(&self) -> &L {
        &self.leads
    }

    /// Stored turns for a session, oldest first.
    pub async fn history(&self, session_id: &str) -> Result<Vec<ChatTurn>, RepositoryError> {
        self.chats.get_turns(session_id).await
    }

    /// Run one inbound message through the pipeline.
    pub async fn handle(&self, request: &ChatRequest) -> ChatReply {
        let session_id = request.session_id();
        let message = request.message();

        let span = info_span!(
            "chat.handle",
            session_id = %session_id,
            message.chars = message.len(),
        );

        async move {
            let history = self.prior_history(session_id).await;

            self.record(ChatTurn::new(session_id, TurnRole::User, message))
                .await;

            let prompt = self.context.build(&history, message);
            let reply = self.client.complete(&prompt).await;

            self.record(ChatTurn::new(session_id, TurnRole::Assistant, reply.as_str()))
                .await;

            let outcome = self.capture_lead(session_id, &reply, message).await;

            let mut response = reply;
            if matches!(outcome, LeadOutcome::Captured(_)) {
                response.push_str(&self.rules.acknowledgement);
            }

            ChatReply { response, outcome }
        }
        .instrument(span)
        .await
    }

    async fn prior_history(&self, session_id: &str) -> Vec<HistoryEntry> {
        match load_history(&self.chats, session_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!(session_id, error = %e, "Failed to load chat history, continuing without it");
                Vec::new()
            }
        }
    }

    async fn record(&self, turn: ChatTurn) {
        if let Err(e) = self.chats.append_turn(&turn).await {
            warn!(
                session_id = %turn.session_id,
                role = %turn.role,
                error = %e,
                "Failed to store chat turn"
            );
        }
    }

    async fn capture_lead(&self, session_id: &str, reply: &str, message: &str) -> LeadOutcome {
        if !self.rules.is_contact_requested(reply, message) {
            return LeadOutcome::NotRequested;
        }

        let info = self.rules.extract_contact_info(message);
        if info.is_empty() {
            debug!(session_id, "Contact requested but no contact lines found");
            return LeadOutcome::NoContactInfo;
        }

        let lead = ContactLead::new(session_id, info, self.rules.interest.as_str());

        match self.leads.save_lead(&lead).await {
            Ok(()) => info!(session_id, lead_id = %lead.id, "Lead captured"),
            Err(e) => warn!(session_id, lead_id = %lead.id, error = %e, "Failed to store lead"),
        }

        if let Err(e) = self.notifier.notify(&lead).await {
            warn!(
                session_id,
                lead_id = %lead.id,
                notifier = self.notifier.name(),
                error = %e,
                "Failed to send lead notification"
            );
        }

        LeadOutcome::Captured(lead)
    }
}

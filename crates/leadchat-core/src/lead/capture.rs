//! Contact-request detection and line-based contact extraction.
//!
//! Both operations are pure functions of a [`LeadRules`] table and the text
//! in front of them.

use leadchat_types::lead::ContactInfo;

use super::rules::{ContactField, LeadRules};

impl LeadRules {
    /// Whether this exchange should be scanned for contact details.
    ///
    /// True when the reply contains the trigger phrase and the user message
    /// mentions at least one keyword, both compared case-insensitively.
    /// An empty trigger phrase never matches.
    pub fn is_contact_requested(&self, reply: &str, message: &str) -> bool {
        if self.trigger_phrase.is_empty() {
            return false;
        }

        let reply = reply.to_lowercase();
        if !reply.contains(&self.trigger_phrase.to_lowercase()) {
            return false;
        }

        let message = message.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| message.contains(&keyword.to_lowercase()))
    }

    /// Pull `marker: value` lines out of a user message.
    ///
    /// Each line is tested against the markers in priority order and fills at
    /// most one field. The value is everything after the line's first `:`,
    /// trimmed. A later line for the same field overwrites an earlier one.
    pub fn extract_contact_info(&self, message: &str) -> ContactInfo {
        let mut info = ContactInfo::default();

        for line in message.lines() {
            let lowered = line.to_lowercase();
            let Some(marker) = self
                .markers
                .iter()
                .find(|m| lowered.contains(m.marker.as_str()))
            else {
                continue;
            };
            let Some((_, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();

            match marker.field {
                ContactField::Name => info.name = Some(value),
                ContactField::Email => info.email = Some(value),
                ContactField::Phone => info.phone = Some(value),
            }
        }

        info
    }
}

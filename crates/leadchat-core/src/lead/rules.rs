//! The lead-capture rule table.
//!
//! All intent heuristics live here as data so the policy can be swapped and
//! tested without any I/O:
//!
//! | rule            | default                                         |
//! |-----------------|-------------------------------------------------|
//! | trigger phrase  | the configured contact prompt                   |
//! | keywords        | `name`, `email`, `phone`                        |
//! | line markers    | `name:` > `email:` > `phone:` (priority order)  |
//! | interest label  | `From chat`                                     |
//! | acknowledgement | thank-you suffix appended to the reply          |
//!
//! The trigger phrase is the same text the model is told to ask with. If
//! the model paraphrases it, detection misses; this coupling is kept as-is.

use serde::{Deserialize, Serialize};

use leadchat_types::config::ChatConfig;

/// Interest label attached to leads captured from chat.
pub const DEFAULT_INTEREST: &str = "From chat";

/// Suffix appended to the reply once contact details were captured.
pub const DEFAULT_ACKNOWLEDGEMENT: &str =
    "\n\nThank you for your contact information! Our team will reach out to you soon.";

/// Which contact field a line marker fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

/// A case-insensitive line marker such as `email:` and the field it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineMarker {
    pub marker: String,
    pub field: ContactField,
}

impl LineMarker {
    pub fn new(marker: &str, field: ContactField) -> Self {
        Self {
            marker: marker.to_lowercase(),
            field,
        }
    }
}

/// Detection and extraction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRules {
    /// Substring whose presence in the reply means the model asked for contact info.
    pub trigger_phrase: String,
    /// At least one must appear in the user message.
    pub keywords: Vec<String>,
    /// Tested per line in this order; the first match wins.
    pub markers: Vec<LineMarker>,
    pub interest: String,
    pub acknowledgement: String,
}

impl LeadRules {
    /// Default rules with the given trigger phrase.
    pub fn new(trigger_phrase: impl Into<String>) -> Self {
        Self {
            trigger_phrase: trigger_phrase.into(),
            keywords: vec!["name".into(), "email".into(), "phone".into()],
            markers: vec![
                LineMarker::new("name:", ContactField::Name),
                LineMarker::new("email:", ContactField::Email),
                LineMarker::new("phone:", ContactField::Phone),
            ],
            interest: DEFAULT_INTEREST.to_string(),
            acknowledgement: DEFAULT_ACKNOWLEDGEMENT.to_string(),
        }
    }

    /// Default rules triggered by the configured contact prompt.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.contact_prompt.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_table() {
        let rules = LeadRules::new("Share your contact info?");
        assert_eq!(rules.trigger_phrase, "Share your contact info?");
        assert_eq!(rules.keywords, vec!["name", "email", "phone"]);
        let markers: Vec<&str> = rules.markers.iter().map(|m| m.marker.as_str()).collect();
        assert_eq!(markers, vec!["name:", "email:", "phone:"]);
        assert_eq!(rules.interest, "From chat");
        assert!(rules.acknowledgement.starts_with("\n\nThank you"));
    }

    #[test]
    fn trigger_comes_from_contact_prompt() {
        let config = ChatConfig::default();
        let rules = LeadRules::from_config(&config);
        assert_eq!(rules.trigger_phrase, config.contact_prompt);
    }

    #[test]
    fn markers_are_lowercased() {
        let marker = LineMarker::new("E-Mail:", ContactField::Email);
        assert_eq!(marker.marker, "e-mail:");
    }
}

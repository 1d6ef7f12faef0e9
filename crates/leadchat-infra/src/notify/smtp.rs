//! SMTP lead notifier.
//!
//! Sends a plain-text mail per captured lead over a STARTTLS relay. The
//! transport and both mailboxes are resolved once at construction so that a
//! bad address is reported at startup, not on the first lead.

use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use secrecy::ExposeSecret;

use leadchat_core::lead::notifier::LeadNotifier;
use leadchat_types::config::MailConfig;
use leadchat_types::error::NotifyError;
use leadchat_types::lead::ContactLead;

pub const SUBJECT: &str = "New Contact Request from Chatbot";

const NOT_PROVIDED: &str = "Not provided";

/// Mails each captured lead to a fixed recipient.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| NotifyError::NotConfigured("EMAIL_HOST is not set".to_string()))?;
        let sender = config
            .sender()
            .ok_or_else(|| NotifyError::NotConfigured("EMAIL_USER is not set".to_string()))?;
        let recipient = config
            .recipient
            .as_deref()
            .ok_or_else(|| NotifyError::NotConfigured("RECIPIENT_EMAIL is not set".to_string()))?;

        let from = parse_mailbox(sender)?;
        let to = parse_mailbox(recipient)?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| NotifyError::Transport(format!("failed to initialize SMTP relay '{host}': {e}")))?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose_secret().to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|e| NotifyError::InvalidAddress {
        address: address.to_string(),
        reason: format!("{e}"),
    })
}

/// Plain-text mail body for a lead.
pub fn render_body(lead: &ContactLead) -> String {
    format!(
        "New contact request:\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Interest: {interest}\n\n\
         Timestamp: {timestamp}",
        name = lead.name.as_deref().unwrap_or(NOT_PROVIDED),
        email = lead.email.as_deref().unwrap_or(NOT_PROVIDED),
        phone = lead.phone.as_deref().unwrap_or(NOT_PROVIDED),
        interest = lead.interest,
        timestamp = lead.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

impl LeadNotifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn notify(&self, lead: &ContactLead) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(SUBJECT)
            .body(render_body(lead))
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(format!("SMTP send failed: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadchat_types::lead::ContactInfo;
    use secrecy::SecretString;

    fn mail_config() -> MailConfig {
        MailConfig {
            smtp_host: Some("smtp.example.com".to_string()),
            username: Some("bot@example.com".to_string()),
            password: Some(SecretString::from("pw".to_string())),
            recipient: Some("sales@example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_body_lists_fields_with_defaults() {
        let lead = ContactLead::new(
            "s1",
            ContactInfo {
                name: Some("Bob".to_string()),
                email: Some("bob@x.com".to_string()),
                phone: None,
            },
            "From chat",
        );

        let body = render_body(&lead);

        assert!(body.starts_with("New contact request:\n\n"));
        assert!(body.contains("Name: Bob\n"));
        assert!(body.contains("Email: bob@x.com\n"));
        assert!(body.contains("Phone: Not provided\n"));
        assert!(body.contains("Interest: From chat\n"));
        assert!(body.contains("Timestamp: "));
    }

    #[tokio::test]
    async fn test_from_config_builds_notifier() {
        let notifier = SmtpNotifier::from_config(&mail_config()).unwrap();
        assert_eq!(notifier.name(), "smtp");
        assert_eq!(notifier.to.email.to_string(), "sales@example.com");
        assert_eq!(notifier.from.email.to_string(), "bot@example.com");
    }

    #[test]
    fn test_missing_host_is_not_configured() {
        let config = MailConfig {
            smtp_host: None,
            ..mail_config()
        };
        assert!(matches!(
            SmtpNotifier::from_config(&config),
            Err(NotifyError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let config = MailConfig {
            recipient: Some("not an address".to_string()),
            ..mail_config()
        };
        assert!(matches!(
            SmtpNotifier::from_config(&config),
            Err(NotifyError::InvalidAddress { .. })
        ));
    }
}

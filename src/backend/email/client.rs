/**
 * Email Client
 *
 * Delivers transactional email. Production uses an SMTP relay through
 * lettre; without `SMTP_HOST` messages are written to the log, and tests
 * capture them in memory.
 */

use std::sync::{Arc, Mutex};

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

/// A plain-text email ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// In-memory mailbox used by tests
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    messages: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl Outbox {
    pub fn messages(&self) -> Vec<OutgoingEmail> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Most recent message sent to `to`
    pub fn last_to(&self, to: &str) -> Option<OutgoingEmail> {
        self.messages().into_iter().rev().find(|m| m.to == to)
    }

    fn push(&self, email: OutgoingEmail) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(email);
        }
    }
}

/// Email delivery backend
#[derive(Clone)]
pub enum EmailClient {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    /// Logs messages instead of sending them
    Log,
    Memory(Outbox),
}

impl EmailClient {
    /// Build the client described by the configuration
    ///
    /// Falls back to [`EmailClient::Log`] when SMTP is not configured or the
    /// relay settings are unusable.
    pub fn from_config(config: &ServerConfig) -> Self {
        let Some(smtp) = &config.smtp else {
            tracing::warn!("SMTP_HOST not set. Outgoing email will be logged only.");
            return EmailClient::Log;
        };

        let from: Mailbox = match config.mail_from.parse() {
            Ok(from) => from,
            Err(e) => {
                tracing::error!("Invalid MAIL_FROM '{}': {:?}", config.mail_from, e);
                return EmailClient::Log;
            }
        };

        let builder = match AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host) {
            Ok(builder) => builder,
            Err(e) => {
                tracing::error!("Failed to configure SMTP relay {}: {:?}", smtp.host, e);
                return EmailClient::Log;
            }
        };

        let builder = match (&smtp.username, &smtp.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };

        tracing::info!("Email delivery via SMTP relay {}", smtp.host);
        EmailClient::Smtp {
            transport: builder.build(),
            from,
        }
    }

    pub fn memory() -> (Self, Outbox) {
        let outbox = Outbox::default();
        (EmailClient::Memory(outbox.clone()), outbox)
    }

    pub async fn send(&self, email: OutgoingEmail) -> Result<(), BackendError> {
        match self {
            EmailClient::Smtp { transport, from } => {
                let to: Mailbox = email
                    .to
                    .parse()
                    .map_err(|e| BackendError::email(format!("Invalid recipient {}: {}", email.to, e)))?;
                let message = Message::builder()
                    .from(from.clone())
                    .to(to)
                    .subject(email.subject.as_str())
                    .header(ContentType::TEXT_PLAIN)
                    .body(email.body)
                    .map_err(|e| BackendError::email(format!("Failed to build message: {}", e)))?;

                transport
                    .send(message)
                    .await
                    .map_err(|e| BackendError::email(format!("SMTP delivery failed: {}", e)))?;
                tracing::info!("Sent email '{}' to {}", email.subject, email.to);
                Ok(())
            }
            EmailClient::Log => {
                tracing::info!(
                    to = %email.to,
                    subject = %email.subject,
                    "Email delivery disabled; message body:\n{}",
                    email.body
                );
                Ok(())
            }
            EmailClient::Memory(outbox) => {
                outbox.push(email);
                Ok(())
            }
        }
    }

    /// Send, logging instead of failing the request on delivery errors
    pub async fn send_best_effort(&self, email: OutgoingEmail) {
        let to = email.to.clone();
        if let Err(e) = self.send(email).await {
            tracing::warn!("Failed to send email to {}: {}", to, e);
        }
    }
}

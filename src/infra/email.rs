//! SMTP email delivery.
//!
//! When no SMTP relay is configured the mailer logs the message instead
//! of sending it, which keeps local development working without an
//! outbound mail account.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::EmailSender;

/// Outbound mailer over an SMTP relay.
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpMailer {
    /// Build the mailer from configuration. Without an SMTP host the
    /// mailer runs in log-only mode.
    pub fn new(config: &Config) -> AppResult<Self> {
        let transport = match &config.smtp_host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| AppError::Email(format!("SMTP transport setup failed: {}", e)))?
                    .port(config.smtp_port);

                if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_pass) {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }

                Some(builder.build())
            }
            None => {
                tracing::warn!("SMTP not configured - emails will be logged, not sent");
                None
            }
        };

        Ok(Self {
            transport,
            from: config.smtp_from.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            tracing::info!(
                to = %recipient,
                subject = %subject,
                "=== EMAIL (not sent) ===\n{}",
                body
            );
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::Email(format!("Invalid from address: {}", e)))?,
            )
            .to(recipient
                .parse()
                .map_err(|e| AppError::Email(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Email(format!("Failed to build email: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Email(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %recipient, "Email sent");
        Ok(())
    }
}

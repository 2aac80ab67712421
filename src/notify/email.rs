// src/notify/email.rs
use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::Publisher;
use crate::config::EmailConfig;

pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSender {
    /// STARTTLS relay with the sender's credentials.
    pub fn from_config(cfg: &EmailConfig) -> Result<Self> {
        let from = cfg
            .sender
            .parse()
            .with_context(|| format!("invalid EMAIL_SENDER {}", cfg.sender))?;
        let to = cfg
            .receiver
            .parse()
            .with_context(|| format!("invalid EMAIL_RECEIVER {}", cfg.receiver))?;

        let creds = Credentials::new(cfg.sender.clone(), cfg.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)
            .with_context(|| format!("invalid SMTP host {}", cfg.smtp_host))?
            .port(cfg.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, from, to })
    }
}

/// Build the HTML message; split out so it can be checked without a server.
pub fn build_message(from: Mailbox, to: Mailbox, subject: &str, html_body: &str) -> Result<Message> {
    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .header(header::ContentType::TEXT_HTML)
        .body(html_body.to_string())
        .context("build email")
}

#[async_trait::async_trait]
impl Publisher for EmailSender {
    async fn publish(&self, subject: &str, html_body: &str) -> Result<()> {
        let msg = build_message(self.from.clone(), self.to.clone(), subject, html_body)?;
        self.mailer.send(msg).await.context("send email")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

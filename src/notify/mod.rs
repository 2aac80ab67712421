// src/notify/mod.rs
pub mod email;

pub use email::EmailSender;

use anyhow::Result;

/// Delivery channel for a finished digest (one recipient).
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, subject: &str, html_body: &str) -> Result<()>;
    /// Channel name for logs.
    fn name(&self) -> &'static str;
}

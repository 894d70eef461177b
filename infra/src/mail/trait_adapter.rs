//! Mail Service Trait Adapter
//!
//! Implements the core `EmailServiceTrait` on top of any infrastructure
//! `MailService`, bridging provider implementations with the domain port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mv_core::services::verification::EmailServiceTrait;

use super::mail_service::MailService;

/// Adapter that implements the core EmailServiceTrait for a boxed mail provider
pub struct MailServiceAdapter {
    inner: Box<dyn MailService>,
}

impl MailServiceAdapter {
    /// Wrap a mail service
    pub fn new(inner: Box<dyn MailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    /// Whether the wrapped provider reports itself as available
    pub async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}

#[async_trait]
impl EmailServiceTrait for MailServiceAdapter {
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        expires_at: DateTime<Utc>,
        custom_message: Option<&str>,
    ) -> Result<String, String> {
        self.inner
            .send_verification_code(recipient, code, expires_at, custom_message)
            .await
            .map_err(|e| e.to_string())
    }

    fn is_valid_email(&self, recipient: &str) -> bool {
        mv_shared::email::is_valid_email(recipient)
    }
}

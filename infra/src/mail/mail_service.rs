//! Mail Service Interface
//!
//! Defines the trait for mail service implementations that deliver
//! verification codes and other messages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::template::render_verification_email;
use crate::InfrastructureError;

/// A rendered message with plain-text and HTML alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text_body: String,
    /// HTML body
    pub html_body: String,
}

/// Mail service trait for sending email messages
///
/// Implementations include:
/// - AWS SES (feature `ses-email`)
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a message to a recipient
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier assigned by the provider
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(
        &self,
        recipient: &str,
        message: &EmailMessage,
    ) -> Result<String, InfrastructureError>;

    /// Send a verification code using the standard template
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        expires_at: DateTime<Utc>,
        custom_message: Option<&str>,
    ) -> Result<String, InfrastructureError> {
        let message =
            render_verification_email(self.app_name(), code, expires_at, Utc::now(), custom_message);
        self.send_email(recipient, &message).await
    }

    /// Application name used in the template
    fn app_name(&self) -> &str;

    /// Get the service provider name (e.g., "AWS SES", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

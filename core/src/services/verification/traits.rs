//! Traits for mail dispatcher integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Outbound channel that delivers an issued code to its recipient
///
/// Implemented in the infrastructure layer; the core only needs the
/// message ID on success or a description of the failure.
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code, optionally with a custom message
    async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        expires_at: DateTime<Utc>,
        custom_message: Option<&str>,
    ) -> Result<String, String>;

    /// Check if the recipient address is acceptable to this dispatcher
    fn is_valid_email(&self, recipient: &str) -> bool;
}

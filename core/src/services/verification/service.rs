//! Main verification service implementation

use chrono::{DateTime, Utc};
use mv_shared::email::mask_email;

use crate::domain::entities::VerificationEntry;
use crate::errors::{DomainError, DomainResult};

use super::config::VerificationServiceConfig;
use super::store::VerificationStore;
use super::traits::EmailServiceTrait;
use super::types::{IssuedCode, SendCodeResult, VerifyOutcome};

/// Verification code lifecycle manager
///
/// Owns the store of outstanding codes. Create one per process and share it
/// behind an `Arc`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct VerificationService {
    /// Outstanding entries keyed by recipient address
    store: VerificationStore,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl VerificationService {
    /// Create a new verification service with an empty store
    ///
    /// Rejects a TTL or code length outside the accepted bounds.
    pub fn new(config: VerificationServiceConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            store: VerificationStore::new(),
            config,
        })
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a new code for `recipient`
    ///
    /// Replaces any pending code for the same address, restarting the TTL.
    /// Does not send anything; the caller delivers the returned code.
    pub fn issue(&self, recipient: &str) -> IssuedCode {
        self.issue_at(recipient, Utc::now())
    }

    /// Issue a new code for `recipient` as of `now`
    pub fn issue_at(&self, recipient: &str, now: DateTime<Utc>) -> IssuedCode {
        if recipient.is_empty() {
            tracing::warn!(event = "empty_recipient", "Issuing verification code for empty recipient");
        }

        let entry = VerificationEntry::generate(self.config.code_length, now, self.config.ttl());
        let issued = IssuedCode {
            code: entry.code.clone(),
            expires_at: entry.expires_at,
        };

        let replaced = self.store.insert(recipient, entry);

        tracing::info!(
            recipient = %mask_email(recipient),
            event = "code_issued",
            expires_at = %issued.expires_at,
            replaced_pending = replaced.is_some(),
            "Issued verification code"
        );

        issued
    }

    /// Check a submitted code for `recipient`
    ///
    /// # Returns
    ///
    /// * `Success` - code matched; the entry is consumed
    /// * `Mismatch` - wrong code; the entry stays for another attempt
    /// * `Expired` - the entry had expired; it is removed
    /// * `NotFound` - nothing pending for this address
    pub fn verify(&self, recipient: &str, code: &str) -> VerifyOutcome {
        self.verify_at(recipient, code, Utc::now())
    }

    /// Check a submitted code for `recipient` as of `now`
    pub fn verify_at(&self, recipient: &str, code: &str, now: DateTime<Utc>) -> VerifyOutcome {
        let outcome = self.store.verify_at(recipient, code, now);
        let masked = mask_email(recipient);

        match outcome {
            VerifyOutcome::Success => tracing::info!(
                recipient = %masked,
                event = "code_verified",
                "Verification code successfully verified"
            ),
            VerifyOutcome::Mismatch => tracing::warn!(
                recipient = %masked,
                event = "code_mismatch",
                "Verification code did not match"
            ),
            VerifyOutcome::Expired => tracing::info!(
                recipient = %masked,
                event = "code_expired",
                "Verification code expired and was removed"
            ),
            VerifyOutcome::NotFound => tracing::debug!(
                recipient = %masked,
                event = "code_not_found",
                "No verification code pending"
            ),
        }

        outcome
    }

    /// Remove all expired entries, returning the number removed
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    /// Remove all entries expired as of `now`
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let removed = self.store.sweep_at(now);
        if removed > 0 {
            tracing::info!(removed, event = "codes_swept", "Cleaned up expired verification codes");
        } else {
            tracing::debug!(event = "codes_swept", "No expired verification codes to clean up");
        }
        removed
    }

    /// Number of outstanding codes
    pub fn pending_count(&self) -> usize {
        self.store.len()
    }

    /// Whether a code is pending for `recipient`
    pub fn has_pending(&self, recipient: &str) -> bool {
        self.store.contains(recipient)
    }

    /// Issue a code and deliver it through `mailer`
    ///
    /// The recipient must pass `mailer.is_valid_email`. The code is committed
    /// before delivery is attempted, and a failed delivery does not revoke it:
    /// it stays valid until it expires or is replaced.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - the issued code and the provider message ID
    /// * `Err(DomainError::Validation)` - the address was rejected, nothing issued
    /// * `Err(DomainError::Dispatch)` - the mailer failed
    pub async fn send_verification_code<E>(
        &self,
        mailer: &E,
        recipient: &str,
        custom_message: Option<&str>,
    ) -> DomainResult<SendCodeResult>
    where
        E: EmailServiceTrait + ?Sized,
    {
        if !mailer.is_valid_email(recipient) {
            return Err(DomainError::Validation {
                message: format!("Invalid email address: {}", mask_email(recipient)),
            });
        }

        let issued = self.issue(recipient);
        let custom_message = custom_message.filter(|m| !m.trim().is_empty());

        let message_id = mailer
            .send_verification_code(recipient, &issued.code, issued.expires_at, custom_message)
            .await
            .map_err(|reason| {
                tracing::error!(
                    recipient = %mask_email(recipient),
                    error = %reason,
                    event = "code_dispatch_failed",
                    "Failed to deliver verification code; issued code remains valid"
                );
                DomainError::Dispatch {
                    recipient: recipient.to_string(),
                    reason,
                }
            })?;

        tracing::info!(
            recipient = %mask_email(recipient),
            message_id = %message_id,
            event = "code_dispatched",
            "Verification code delivered"
        );

        Ok(SendCodeResult { issued, message_id })
    }
}

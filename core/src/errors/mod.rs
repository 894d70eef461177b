//! Domain-specific error types.
//!
//! Verification outcomes (`Success`, `Mismatch`, `Expired`, `NotFound`) are
//! plain values, see [`crate::services::verification::VerifyOutcome`]. The
//! errors below cover only the surrounding flow: rejected input and a failed
//! delivery through the mail dispatcher.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to deliver verification code to {recipient}: {reason}")]
    Dispatch { recipient: String, reason: String },
}

impl DomainError {
    /// True if the error came from the mail dispatcher
    pub fn is_dispatch(&self) -> bool {
        matches!(self, DomainError::Dispatch { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

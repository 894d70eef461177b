//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A freshly issued code, returned to the caller for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    /// The verification code
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Result of issuing and delivering a verification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCodeResult {
    /// The code that was issued and sent
    pub issued: IssuedCode,
    /// Message ID reported by the mail provider
    pub message_id: String,
}

/// Outcome of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Code matched; the entry has been consumed
    Success,
    /// Code did not match; the entry is kept for another attempt
    Mismatch,
    /// The entry had expired and has been removed
    Expired,
    /// No outstanding code for this recipient
    NotFound,
}

impl VerifyOutcome {
    /// Whether the code was accepted
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Success)
    }

    /// Human-readable description for front ends
    pub fn message(&self) -> &'static str {
        match self {
            VerifyOutcome::Success => "Verification successful",
            VerifyOutcome::Mismatch => "Invalid verification code",
            VerifyOutcome::Expired => "Verification code has expired",
            VerifyOutcome::NotFound => "No verification code found for this email",
        }
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

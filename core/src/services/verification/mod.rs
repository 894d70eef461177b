//! Verification service module for email-based verification
//!
//! This module provides the verification code lifecycle:
//! - Code generation and issuance with a fixed TTL
//! - One-time verification against the stored code
//! - Expiry sweep, on demand or from a background task
//! - Delivery of issued codes through a pluggable mail dispatcher

mod cleanup;
mod config;
mod service;
mod store;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{SweepResult, SweepService};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use store::VerificationStore;
pub use traits::EmailServiceTrait;
pub use types::{IssuedCode, SendCodeResult, VerifyOutcome};

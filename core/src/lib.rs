//! # MailVerify Core
//!
//! Core business logic and domain layer for MailVerify.
//! This crate contains the verification entry entity, the verification code
//! lifecycle service, the mail dispatcher port and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;

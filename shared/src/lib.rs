//! Shared utilities and common types for MailVerify
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types loaded from the environment
//! - Email address utilities (validation, masking for logs)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, LogFormat, LoggingConfig, MailConfig,
    VerificationConfig,
};
pub use utils::email;

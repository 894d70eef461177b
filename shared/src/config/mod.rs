//! Configuration module with business-specific sub-modules
//!
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound mail provider and branding
//! - `verification` - Code lifetime, length and sweep cadence
//!
//! Every loader takes a variable lookup function so that values can come
//! from the process environment (`from_env`) or from a fixed map in tests.

pub mod environment;
pub mod mail;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::MailConfig;
pub use verification::VerificationConfig;

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Value out of range for {key}: {value} (min: {min}, max: {max})")]
    OutOfRange {
        key: String,
        value: String,
        min: String,
        max: String,
    },
}

/// Parse an optional variable, using `default` when it is absent
pub(crate) fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Verification code lifecycle configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Mail delivery configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_vars(&lookup);
        Ok(Self {
            environment,
            verification: VerificationConfig::from_vars(&lookup)?,
            mail: MailConfig::from_vars(&lookup)?,
            logging: LoggingConfig::from_vars(environment, &lookup)?,
        })
    }

    /// Human-readable configuration report without secrets
    pub fn summary(&self) -> String {
        format!(
            "Environment: {}\nSender Email: {}\nMail Provider: {}\nApp Name: {}\nCode TTL: {} minutes\nCode Length: {} digits",
            self.environment,
            self.mail.sender_email.as_deref().unwrap_or("Not configured"),
            self.mail.provider,
            self.mail.app_name,
            self.verification.code_ttl_minutes,
            self.verification.code_length,
        )
    }
}

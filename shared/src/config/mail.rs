//! Outbound mail configuration module

use serde::{Deserialize, Serialize};

use crate::utils::email::is_valid_email;

use super::ConfigError;

/// Application name used when `APP_NAME` is not set
pub const DEFAULT_APP_NAME: &str = "Email Verification Service";

/// Mail delivery settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MailConfig {
    /// Delivery provider ("mock", "ses")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// From address of outgoing messages
    #[serde(default)]
    pub sender_email: Option<String>,

    /// Application name shown in subjects and bodies
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Provider region (SES)
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            sender_email: None,
            app_name: default_app_name(),
            region: default_region(),
        }
    }
}

impl MailConfig {
    /// Load from `MAIL_PROVIDER`, `SENDER_EMAIL`, `APP_NAME` and `AWS_REGION`
    ///
    /// A present but malformed `SENDER_EMAIL` is rejected.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sender_email = lookup("SENDER_EMAIL").filter(|s| !s.trim().is_empty());
        if let Some(sender) = &sender_email {
            if !is_valid_email(sender) {
                return Err(ConfigError::InvalidValue {
                    key: "SENDER_EMAIL".to_string(),
                    value: sender.clone(),
                });
            }
        }

        Ok(Self {
            provider: lookup("MAIL_PROVIDER")
                .map(|p| p.to_lowercase())
                .unwrap_or_else(default_provider),
            sender_email,
            app_name: lookup("APP_NAME").unwrap_or_else(default_app_name),
            region: lookup("AWS_REGION").unwrap_or_else(default_region),
        })
    }

    /// True once a sender address is available
    pub fn is_configured(&self) -> bool {
        self.sender_email.is_some()
    }
}

fn default_provider() -> String {
    String::from("mock")
}

fn default_app_name() -> String {
    String::from(DEFAULT_APP_NAME)
}

fn default_region() -> String {
    String::from("us-east-1")
}

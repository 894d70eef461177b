//! Mail Service Module
//!
//! Outbound email delivery for verification codes. Includes a provider
//! independent interface, the message template, a mock implementation for
//! development and an AWS SES implementation.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all mail providers
//! - **Mock Implementation**: Console output for development
//! - **AWS SES Support**: Production delivery via SES v2 (feature `ses-email`)
//! - **Security**: Recipient masking in logs

pub mod mail_service;
pub mod mock_mail;
pub mod template;
pub mod trait_adapter;

// AWS SES mail service (feature-gated)
#[cfg(feature = "ses-email")]
pub mod ses;

pub use mail_service::{EmailMessage, MailService};
pub use mock_mail::MockMailService;
pub use template::{escape_html, render_verification_email};
pub use trait_adapter::MailServiceAdapter;

#[cfg(feature = "ses-email")]
pub use ses::{SesConfig, SesMailService};

use mv_shared::MailConfig;

#[cfg(test)]
mod tests;

/// Create a mail service based on configuration
///
/// Unknown providers and providers that fail to initialise fall back to
/// the mock service.
pub async fn create_mail_service(config: &MailConfig) -> Box<dyn MailService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockMailService::new(config.app_name.clone())),
        #[cfg(feature = "ses-email")]
        "ses" | "aws-ses" => match SesConfig::from_mail_config(config) {
            Ok(ses_config) => match SesMailService::new(ses_config).await {
                Ok(service) => Box::new(service),
                Err(e) => {
                    tracing::error!("Failed to initialize AWS SES mail service: {}", e);
                    tracing::warn!("Falling back to mock mail service");
                    Box::new(MockMailService::new(config.app_name.clone()))
                }
            },
            Err(e) => {
                tracing::error!("Invalid AWS SES configuration: {}", e);
                tracing::warn!("Falling back to mock mail service");
                Box::new(MockMailService::new(config.app_name.clone()))
            }
        },
        other => {
            tracing::warn!("Unknown mail provider: {}, using mock service", other);
            Box::new(MockMailService::new(config.app_name.clone()))
        }
    }
}

//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailVerify
//! service. It provides concrete mail delivery providers for the core
//! verification service, configuration loading and tracing setup.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Mail**: Mail delivery integrations (mock console output, AWS SES)
//! - **Telemetry**: `tracing-subscriber` initialisation
//!
//! ## Features
//!
//! - `ses-email`: Enable the AWS SES mail service (default)

use std::sync::Arc;

use mv_core::errors::DomainResult;
use mv_core::services::verification::{
    SendCodeResult, SweepService, VerificationService, VerificationServiceConfig, VerifyOutcome,
};
use mv_shared::{AppConfig, ConfigError, Environment};
use tokio::task::JoinHandle;

/// Mail service module - outbound email providers
pub mod mail;

/// Tracing subscriber setup
pub mod telemetry;

use mail::{create_mail_service, MailServiceAdapter};

/// Infrastructure service container
///
/// Owns the verification service, the mail adapter used to deliver codes
/// and the handle of the background sweep task, if one is running.
pub struct InfrastructureServices {
    /// Loaded application configuration
    pub config: AppConfig,
    /// Verification code lifecycle manager
    pub verification: Arc<VerificationService>,
    /// Mail dispatcher bridged to the core port
    pub mailer: Arc<MailServiceAdapter>,
    sweeper: Option<JoinHandle<()>>,
}

impl InfrastructureServices {
    /// Issue a code for `recipient` and deliver it by email
    pub async fn send_verification_code(
        &self,
        recipient: &str,
        custom_message: Option<&str>,
    ) -> DomainResult<SendCodeResult> {
        self.verification
            .send_verification_code(self.mailer.as_ref(), recipient, custom_message)
            .await
    }

    /// Check a submitted code
    pub fn verify(&self, recipient: &str, code: &str) -> VerifyOutcome {
        self.verification.verify(recipient, code)
    }

    /// Remove expired codes now
    pub fn sweep(&self) -> usize {
        self.verification.sweep()
    }

    /// Number of outstanding codes
    pub fn pending_count(&self) -> usize {
        self.verification.pending_count()
    }

    /// Whether the background sweep task is running
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the background sweep task
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.sweeper.take() {
            handle.abort();
            tracing::info!("Background sweep task stopped");
        }
    }
}

impl Drop for InfrastructureServices {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Initialize infrastructure services with async runtime
///
/// This function sets up:
/// - The verification service with the configured TTL and code length
/// - The mail provider selected by `MAIL_PROVIDER`
/// - The background sweep task, unless disabled
///
/// Must be called from within a Tokio runtime.
pub async fn initialize(config: AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    config.verification.validate()?;

    let verification = Arc::new(
        VerificationService::new(VerificationServiceConfig::from(&config.verification))
            .map_err(|e| InfrastructureError::Config(e.to_string()))?,
    );

    let mail_service = create_mail_service(&config.mail).await;
    tracing::info!(
        provider = mail_service.provider_name(),
        configured = config.mail.is_configured(),
        "Mail service ready"
    );
    let mailer = Arc::new(MailServiceAdapter::new(mail_service));

    let sweeper = Arc::new(SweepService::new(verification.clone())).start_background_task();

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        config,
        verification,
        mailer,
        sweeper,
    })
}

/// Load application configuration from environment
///
/// Reads the environment's own file (`.env.development`, `.env.staging` or
/// `.env.production`) and then `.env`, if present. Neither overrides a
/// variable that is already set, so the environment file wins over `.env`.
/// The environment itself is taken from the process variables.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = Environment::from_vars(|key| std::env::var(key).ok());
    if dotenvy::from_filename(environment.env_file()).is_ok() {
        tracing::debug!("Loaded {}", environment.env_file());
    }
    dotenvy::dotenv().ok();
    Ok(AppConfig::from_env()?)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid configuration value
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),
}

//! Configuration for the verification service

use chrono::Duration;

use crate::errors::{DomainError, DomainResult};
use mv_shared::config::verification::{
    VerificationConfig, DEFAULT_CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES,
    DEFAULT_SWEEP_INTERVAL_SECONDS,
};

/// Configuration for the verification service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_ttl_minutes: i64,
    /// Number of digits per generated code
    pub code_length: usize,
    /// Seconds between background sweeps (0 disables)
    pub sweep_interval_seconds: u64,
}

impl VerificationServiceConfig {
    /// Code lifetime as a duration
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.code_ttl_minutes)
    }

    /// Apply the same bounds as `VerificationConfig::validate`
    pub fn validate(&self) -> DomainResult<()> {
        VerificationConfig {
            code_ttl_minutes: self.code_ttl_minutes,
            code_length: self.code_length,
            sweep_interval_seconds: self.sweep_interval_seconds,
        }
        .validate()
        .map_err(|e| DomainError::Validation {
            message: e.to_string(),
        })
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            code_length: DEFAULT_CODE_LENGTH,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl_minutes: config.code_ttl_minutes,
            code_length: config.code_length,
            sweep_interval_seconds: config.sweep_interval_seconds,
        }
    }
}

//! Verification code configuration module

use serde::{Deserialize, Serialize};

use super::{parse_var, ConfigError};

/// Default lifetime of an issued code in minutes
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;

/// Default number of digits in an issued code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default cadence of the background expiry sweep in seconds
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 60;

/// Longest code length accepted from configuration
pub const MAX_CODE_LENGTH: usize = 12;

/// Longest code lifetime accepted from configuration (one year)
pub const MAX_CODE_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Verification code lifecycle settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    #[serde(default = "default_ttl_minutes")]
    pub code_ttl_minutes: i64,

    /// Number of decimal digits per code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds between background sweeps (0 disables the sweeper)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
            code_length: DEFAULT_CODE_LENGTH,
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }
}

impl VerificationConfig {
    /// Load from `VERIFICATION_*` variables, falling back to defaults
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            code_ttl_minutes: parse_var(
                &lookup,
                "VERIFICATION_CODE_TTL_MINUTES",
                DEFAULT_CODE_TTL_MINUTES,
            )?,
            code_length: parse_var(&lookup, "VERIFICATION_CODE_LENGTH", DEFAULT_CODE_LENGTH)?,
            sweep_interval_seconds: parse_var(
                &lookup,
                "VERIFICATION_SWEEP_INTERVAL_SECONDS",
                DEFAULT_SWEEP_INTERVAL_SECONDS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that TTL is within 1..=MAX_CODE_TTL_MINUTES and code length
    /// within 1..=MAX_CODE_LENGTH
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CODE_TTL_MINUTES).contains(&self.code_ttl_minutes) {
            return Err(ConfigError::OutOfRange {
                key: "VERIFICATION_CODE_TTL_MINUTES".to_string(),
                value: self.code_ttl_minutes.to_string(),
                min: "1".to_string(),
                max: MAX_CODE_TTL_MINUTES.to_string(),
            });
        }
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::OutOfRange {
                key: "VERIFICATION_CODE_LENGTH".to_string(),
                value: self.code_length.to_string(),
                min: "1".to_string(),
                max: MAX_CODE_LENGTH.to_string(),
            });
        }
        Ok(())
    }

    /// Whether the background sweeper should run
    pub fn sweep_enabled(&self) -> bool {
        self.sweep_interval_seconds > 0
    }
}

fn default_ttl_minutes() -> i64 {
    DEFAULT_CODE_TTL_MINUTES
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_sweep_interval() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_ttl_minutes, 10);
        assert_eq!(config.code_length, 6);
        assert!(config.sweep_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars() {
        let config = VerificationConfig::from_vars(|key| match key {
            "VERIFICATION_CODE_TTL_MINUTES" => Some("5".to_string()),
            "VERIFICATION_CODE_LENGTH" => Some("8".to_string()),
            "VERIFICATION_SWEEP_INTERVAL_SECONDS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.code_ttl_minutes, 5);
        assert_eq!(config.code_length, 8);
        assert!(!config.sweep_enabled());
    }

    #[test]
    fn test_from_vars_rejects_garbage() {
        let err = VerificationConfig::from_vars(|key| {
            (key == "VERIFICATION_CODE_LENGTH").then(|| "six".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_ranges() {
        let zero_ttl = VerificationConfig {
            code_ttl_minutes: 0,
            ..Default::default()
        };
        assert!(zero_ttl.validate().is_err());

        let too_long = VerificationConfig {
            code_length: MAX_CODE_LENGTH + 1,
            ..Default::default()
        };
        assert!(too_long.validate().is_err());

        let empty = VerificationConfig {
            code_length: 0,
            ..Default::default()
        };
        assert!(empty.validate().is_err());

        let one_year = VerificationConfig {
            code_ttl_minutes: MAX_CODE_TTL_MINUTES,
            ..Default::default()
        };
        assert!(one_year.validate().is_ok());
    }

    #[test]
    fn test_from_vars_rejects_huge_ttl() {
        let err = VerificationConfig::from_vars(|key| {
            (key == "VERIFICATION_CODE_TTL_MINUTES").then(|| "1000000000000".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::OutOfRange {
                key: "VERIFICATION_CODE_TTL_MINUTES".to_string(),
                value: "1000000000000".to_string(),
                min: "1".to_string(),
                max: MAX_CODE_TTL_MINUTES.to_string(),
            }
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: VerificationConfig =
            serde_json::from_str(r#"{"code_ttl_minutes": 15}"#).unwrap();
        assert_eq!(config.code_ttl_minutes, 15);
        assert_eq!(config.code_length, DEFAULT_CODE_LENGTH);
        assert_eq!(config.sweep_interval_seconds, DEFAULT_SWEEP_INTERVAL_SECONDS);
    }
}

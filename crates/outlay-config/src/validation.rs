// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shape, non-empty paths, and window bounds.

use crate::diagnostic::ConfigError;
use crate::model::OutlayConfig;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &OutlayConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate base_url is not empty and has an HTTP scheme
    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    // Validate timeout is non-zero
    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    // Validate storage_path is not empty
    if config.session.storage_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.storage_path must not be empty".to_string(),
        });
    }

    // Validate monthly window bounds
    if config.insights.monthly_window == 0 {
        errors.push(ConfigError::Validation {
            message: "insights.monthly_window must be at least 1".to_string(),
        });
    }

    // Validate log level is a recognized tracing level
    if !VALID_LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                VALID_LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = OutlayConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = OutlayConfig::default();
        config.api.base_url = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }

    #[test]
    fn schemeless_base_url_fails_validation() {
        let mut config = OutlayConfig::default();
        config.api.base_url = "localhost:8000/api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("http://"))));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = OutlayConfig::default();
        config.api.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))));
    }

    #[test]
    fn zero_monthly_window_fails_validation() {
        let mut config = OutlayConfig::default();
        config.insights.monthly_window = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("monthly_window"))));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = OutlayConfig::default();
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log.level"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = OutlayConfig::default();
        config.api.base_url = "https://expenses.example.com/api".to_string();
        config.api.timeout_secs = 5;
        config.session.storage_path = "/tmp/outlay-session.json".to_string();
        config.insights.monthly_window = 12;
        config.log.level = "debug".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn all_errors_collected_not_fail_fast() {
        let mut config = OutlayConfig::default();
        config.api.base_url = "".to_string();
        config.api.timeout_secs = 0;
        config.insights.monthly_window = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}

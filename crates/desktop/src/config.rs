//! Start-up configuration read from the environment.

use thiserror::Error;

use salesdesk_observability::{LogFormat, UnknownLogFormat};

pub const LOG_FORMAT_VAR: &str = "SALESDESK_LOG_FORMAT";
pub const DIGIT_GROUPING_VAR: &str = "SALESDESK_DIGIT_GROUPING";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SALESDESK_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),

    #[error("SALESDESK_DIGIT_GROUPING: expected true or false, got {0:?}")]
    DigitGrouping(String),
}

/// Form settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub log_format: LogFormat,
    /// Group thousands in displayed prices, amounts and the total.
    pub digit_grouping: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            digit_grouping: true,
        }
    }
}

impl FormConfig {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }

        if let Some(raw) = lookup(DIGIT_GROUPING_VAR) {
            config.digit_grouping = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::DigitGrouping(raw)),
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = FormConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, FormConfig::default());
        assert!(config.digit_grouping);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = FormConfig::from_lookup(lookup_from(&[
            (LOG_FORMAT_VAR, "pretty"),
            (DIGIT_GROUPING_VAR, "off"),
        ]))
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.digit_grouping);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = FormConfig::from_lookup(lookup_from(&[(DIGIT_GROUPING_VAR, "maybe")])).unwrap_err();
        assert_eq!(err, ConfigError::DigitGrouping("maybe".to_string()));

        let err = FormConfig::from_lookup(lookup_from(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::LogFormat(_)));
    }
}

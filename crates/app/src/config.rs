//! Environment configuration.
//!
//! Values are read through a lookup function so callers (and tests) decide where
//! they come from; [`AppConfig::from_env`] is the process-environment binding.

use thiserror::Error;

use larder_ai::GeminiGateway;
use larder_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use larder_inventory::ReminderThreshold;

/// Credential variables, in lookup order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const MODEL_VAR: &str = "LARDER_MODEL";
pub const BASE_URL_VAR: &str = "LARDER_API_BASE_URL";
pub const REMINDER_DAYS_VAR: &str = "LARDER_REMINDER_DAYS";
pub const SCAN_EXPIRY_DAYS_VAR: &str = "LARDER_SCAN_EXPIRY_DAYS";

/// Default expiry offset proposed for scanned receipt lines.
pub const DEFAULT_SCAN_EXPIRY_DAYS: u32 = 7;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing API credential: set GEMINI_API_KEY or API_KEY")]
    MissingCredential,

    #[error("invalid value for {var}: {value:?} (expected a whole number of days)")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub reminder_threshold: ReminderThreshold,
    pub scan_expiry_days: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| get(*var))
            .ok_or(ConfigError::MissingCredential)?;

        let reminder_days = parse_days(REMINDER_DAYS_VAR, get(REMINDER_DAYS_VAR))?
            .unwrap_or(ReminderThreshold::DEFAULT_DAYS);
        let scan_expiry_days = parse_days(SCAN_EXPIRY_DAYS_VAR, get(SCAN_EXPIRY_DAYS_VAR))?
            .unwrap_or(DEFAULT_SCAN_EXPIRY_DAYS);

        Ok(Self {
            api_key,
            model: get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            reminder_threshold: ReminderThreshold::days(reminder_days),
            scan_expiry_days,
        })
    }

    pub fn gateway(&self) -> GeminiGateway {
        GeminiGateway::new(self.api_key.clone())
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
    }
}

fn parse_days(var: &'static str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    value
        .map(|value| value.parse::<u32>().map_err(|_| ConfigError::Invalid { var, value }))
        .transpose()
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("reminder_threshold", &self.reminder_threshold)
            .field("scan_expiry_days", &self.scan_expiry_days)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_with_only_a_key() {
        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.reminder_threshold, ReminderThreshold::default());
        assert_eq!(config.scan_expiry_days, 7);
    }

    #[test]
    fn gemini_key_wins_over_generic_key() {
        let config =
            AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")])).unwrap();
        assert_eq!(config.api_key, "g");
    }

    #[test]
    fn missing_or_blank_key_is_fatal() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingCredential
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err(),
            ConfigError::MissingCredential
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            ("API_KEY", "k"),
            ("LARDER_MODEL", "gemini-2.5-pro"),
            ("LARDER_API_BASE_URL", "http://localhost:8080"),
            ("LARDER_REMINDER_DAYS", "7"),
            ("LARDER_SCAN_EXPIRY_DAYS", "14"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.reminder_threshold.as_days(), 7);
        assert_eq!(config.scan_expiry_days, 14);
        assert_eq!(config.gateway().model(), "gemini-2.5-pro");
    }

    #[test]
    fn non_numeric_days_are_rejected() {
        let pairs = [("API_KEY", "k"), ("LARDER_REMINDER_DAYS", "soon")];
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: REMINDER_DAYS_VAR,
                value: "soon".to_owned()
            }
        );
    }

    #[test]
    fn debug_redacts_key() {
        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "super-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}

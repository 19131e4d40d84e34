//! CLI configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use billsplit_core::DEFAULT_TOLERANCE;
use serde::Serialize;

/// Runtime settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CliConfig {
    /// Relative tolerance for the reconciliation check (`BILLSPLIT_TOLERANCE`)
    pub tolerance: f64,

    /// Fail when the split does not reconcile (`BILLSPLIT_STRICT`)
    pub strict: bool,

    /// Sheet used by `compute` when no file is given (`BILLSPLIT_SHEET`)
    pub default_sheet: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strict: false,
            default_sheet: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tolerance = match lookup("BILLSPLIT_TOLERANCE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t >= 0.0)
                .ok_or_else(|| ConfigError::InvalidValue("BILLSPLIT_TOLERANCE".to_string()))?,
            None => DEFAULT_TOLERANCE,
        };

        let strict = match lookup("BILLSPLIT_STRICT") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("BILLSPLIT_STRICT".to_string()))?,
            None => false,
        };

        let default_sheet = lookup("BILLSPLIT_SHEET")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(CliConfig {
            tolerance,
            strict,
            default_sheet,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(load(&[]).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BILLSPLIT_TOLERANCE", "0.001"),
            ("BILLSPLIT_STRICT", "TRUE"),
            ("BILLSPLIT_SHEET", "dinner.csv"),
        ])
        .unwrap();

        assert_eq!(config.tolerance, 0.001);
        assert!(config.strict);
        assert_eq!(config.default_sheet, Some(PathBuf::from("dinner.csv")));
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("BILLSPLIT_TOLERANCE", "tiny")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for BILLSPLIT_TOLERANCE");

        assert!(load(&[("BILLSPLIT_TOLERANCE", "-1")]).is_err());
        assert!(load(&[("BILLSPLIT_STRICT", "maybe")]).is_err());
    }

    #[test]
    fn test_blank_sheet_is_unset() {
        assert_eq!(load(&[("BILLSPLIT_SHEET", "  ")]).unwrap().default_sheet, None);
    }
}

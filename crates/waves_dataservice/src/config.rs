use std::env;

use crate::error::{DataServiceError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.wavesplatform.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_VAR: &str = "WAVES_DATA_SERVICE_URL";
pub const TIMEOUT_VAR: &str = "WAVES_DATA_SERVICE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataServiceConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DataServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `WAVES_DATA_SERVICE_URL` and `WAVES_DATA_SERVICE_TIMEOUT_SECS`,
    /// falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::var(BASE_URL_VAR).ok(), env::var(TIMEOUT_VAR).ok())
    }

    fn from_vars(base_url: Option<String>, timeout: Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(timeout) = timeout {
            let secs = timeout.trim().parse::<u64>().map_err(|e| {
                DataServiceError::Config(format!("{TIMEOUT_VAR}=`{timeout}`: {e}"))
            })?;
            config.timeout_secs = Some(secs);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vars_use_defaults() {
        let config = DataServiceConfig::from_vars(None, None).unwrap();
        assert_eq!(config, DataServiceConfig::default());
    }

    #[test]
    fn vars_override_defaults() {
        let config = DataServiceConfig::from_vars(
            Some("http://localhost:3000/".to_string()),
            Some("5".to_string()),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:3000/");
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let result = DataServiceConfig::from_vars(None, Some("soon".to_string()));
        assert!(matches!(result, Err(DataServiceError::Config(_))));
    }
}

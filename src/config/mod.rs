use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub mod validator;

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_VS_CURRENCY: &str = "usd";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

pub const ENV_DATA_DIR: &str = "CRYPTO_TRACKER_DATA_DIR";
pub const ENV_LOG_FILE: &str = "CRYPTO_TRACKER_LOG_FILE";
pub const ENV_API_URL: &str = "CRYPTO_TRACKER_API_URL";
pub const ENV_VS_CURRENCY: &str = "CRYPTO_TRACKER_VS_CURRENCY";
pub const ENV_TIMEOUT_SECS: &str = "CRYPTO_TRACKER_TIMEOUT_SECS";
pub const ENV_BIND: &str = "CRYPTO_TRACKER_BIND";

/// Upstream quote endpoint settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub vs_currency: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Directory holding `<symbol>_history.json` and `<symbol>_history.csv`.
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub api: ApiConfig,
    pub bind: String,
}

impl TrackerConfig {
    /// Defaults relative to the working directory, matching the layout the CLI
    /// has always used: history files in `.` and the log under `logs/`.
    pub fn builtin() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            log_file: PathBuf::from("logs").join("tracker.log"),
            api: ApiConfig::default(),
            bind: DEFAULT_BIND.to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Apply overrides from any key/value source on top of [`TrackerConfig::builtin`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::builtin();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = value(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = value(ENV_LOG_FILE) {
            config.log_file = PathBuf::from(file);
        }
        if let Some(url) = value(ENV_API_URL) {
            config.api.base_url = url.trim().to_string();
        }
        if let Some(currency) = value(ENV_VS_CURRENCY) {
            config.api.vs_currency = currency.trim().to_lowercase();
        }
        if let Some(raw) = value(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                AppError::message(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got `{raw}`"
                ))
            })?;
            config.api.timeout = Duration::from_secs(secs);
        }
        if let Some(bind) = value(ENV_BIND) {
            config.bind = bind.trim().to_string();
        }

        validator::validate_config(&config)?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| AppError::message(format!("invalid bind address `{}`", self.bind)))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::builtin()
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
    fn builtin_matches_documented_defaults() {
        let config = TrackerConfig::builtin();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.log_file, PathBuf::from("logs/tracker.log"));
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.vs_currency, "usd");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = TrackerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TrackerConfig::builtin());
    }

    #[test]
    fn overrides_are_applied() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/var/lib/tracker"),
            (ENV_VS_CURRENCY, "EUR"),
            (ENV_TIMEOUT_SECS, "12"),
            (ENV_BIND, "0.0.0.0:9000"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/tracker"));
        assert_eq!(config.api.vs_currency, "eur");
        assert_eq!(config.api.timeout, Duration::from_secs(12));
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = TrackerConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]))
            .expect_err("timeout should be rejected");
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS), "got: {err}");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = TrackerConfig::from_lookup(lookup_from(&[(ENV_API_URL, "   ")])).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }
}

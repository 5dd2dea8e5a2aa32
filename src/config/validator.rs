use reqwest::Url;

use crate::error::{AppError, Result};

use super::TrackerConfig;

/// Reject settings that would only fail later, at request time.
pub fn validate_config(config: &TrackerConfig) -> Result<()> {
    if config.api.timeout.is_zero() {
        return Err(AppError::message("request timeout must be greater than zero"));
    }

    let url = Url::parse(&config.api.base_url).map_err(|err| {
        AppError::message(format!(
            "invalid API base URL `{}`: {err}",
            config.api.base_url
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::message(format!(
            "API base URL must use http or https, got `{}`",
            url.scheme()
        )));
    }

    if config.api.vs_currency.trim().is_empty() {
        return Err(AppError::message("quote currency must not be empty"));
    }

    if config.data_dir.as_os_str().is_empty() {
        return Err(AppError::message("data directory must not be empty"));
    }

    Ok(())
}

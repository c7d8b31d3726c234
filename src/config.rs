//! Configuration constants and utilities for calcline
//!
//! Everything that is tunable from the outside (API location, timeouts,
//! logging) is resolved here so the rest of the crate works with plain values.

use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;

/// Default base URL of the calculation API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Environment variable name for overriding the API base URL
pub const API_URL_ENV_VAR: &str = "CALCLINE_API_URL";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "CALCLINE_LOG_LEVEL";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of entries kept in the calculation history
pub const HISTORY_LIMIT: usize = 5;

/// Text shown in the display after a failed calculation
pub const ERROR_TOKEN: &str = "Error";

/// Text shown in the display while a calculation is in flight
pub const LOADING_TEXT: &str = "Loading...";

/// Message used when the server fails without telling us why
pub const DEFAULT_FAILURE_MESSAGE: &str = "API request failed";

/// Resolved runtime settings for the client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    api_base_url: String,
    timeout: Duration,
}

impl ClientSettings {
    /// Build settings, validating the base URL
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).with_context(|| format!("Invalid API base URL: '{api_base_url}'"))?;

        Ok(Self {
            api_base_url: trimmed.to_string(),
            timeout,
        })
    }

    /// Base URL without trailing slash, e.g. `http://localhost:8080/api/v1`
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Get the API base URL: explicit override first, then environment variable, then default
pub fn get_api_base_url(cli_override: Option<&str>) -> String {
    if let Some(url) = cli_override {
        return url.to_string();
    }

    std::env::var_os(API_URL_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

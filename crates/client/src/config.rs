//! # Backend client configuration
//!
//! ## Environment Variables
//!
//! - `BACKEND_API_URL`: base URL of the studio backend API (required)
//! - `BACKEND_TIMEOUT_SECONDS`: per-request timeout (default: 10)
//! - `BACKEND_RETRY_DELAY_MS`: pause before the single retry (default: 250)

use std::{env, time::Duration};

use eyre::{Result, WrapErr};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `https://api.sesifoto.my`
    pub base_url: String,

    /// Timeout applied to every backend request
    pub timeout: Duration,

    /// Delay before retrying a failed request
    pub retry_delay: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS),
            retry_delay: Duration::from_millis(Self::DEFAULT_RETRY_DELAY_MS),
        }
    }

    /// Loads the client settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `BACKEND_API_URL` is missing or a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("BACKEND_API_URL").wrap_err("BACKEND_API_URL environment variable must be set")?;

        let timeout = env::var("BACKEND_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECONDS.to_string())
            .parse()
            .wrap_err("Invalid BACKEND_TIMEOUT_SECONDS value")?;

        let retry_delay = env::var("BACKEND_RETRY_DELAY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_RETRY_DELAY_MS.to_string())
            .parse()
            .wrap_err("Invalid BACKEND_RETRY_DELAY_MS value")?;

        Ok(Self {
            timeout: Duration::from_secs(timeout),
            retry_delay: Duration::from_millis(retry_delay),
            ..Self::new(base_url)
        })
    }
}

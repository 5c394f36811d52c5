//! # Storefront Configuration Module
//!
//! Loads the storefront service settings from environment variables, with
//! defaults for everything except the backend location (see
//! [`studiobook_client::ClientConfig`]).
//!
//! ## Environment Variables
//!
//! - `STOREFRONT_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `STOREFRONT_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `STOREFRONT_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `STOREFRONT_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `STOREFRONT_DEV_STUDIO`: Studio served on localhost when nothing else names one (default: "najiahstudio")
//! - `STOREFRONT_LOCAL_SLOT_FALLBACK`: Compute slots locally when the backend slot endpoint fails (default: true)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

pub const DEFAULT_DEV_STUDIO: &str = "najiahstudio";

/// Configuration for the storefront service
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use studiobook_storefront::config::StorefrontConfig;
///
/// fn example() -> Result<()> {
///     let config = StorefrontConfig::from_env()?;
///     println!("Starting storefront on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Host address for the server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Slug used on development hosts when no override is present
    pub dev_studio: String,

    /// Whether slot requests fall back to the local generator
    pub local_slot_fallback: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            dev_studio: DEFAULT_DEV_STUDIO.to_string(),
            local_slot_fallback: true,
        }
    }
}

impl StorefrontConfig {
    /// Creates a new StorefrontConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The STOREFRONT_PORT value cannot be parsed as a u16
    /// - The STOREFRONT_LOCAL_SLOT_FALLBACK value is not `true` or `false`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("STOREFRONT_HOST").unwrap_or(defaults.host);
        let port = env::var("STOREFRONT_PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse()
            .wrap_err("Invalid STOREFRONT_PORT value")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("STOREFRONT_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("STOREFRONT_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.request_timeout);

        // Tenant settings
        let dev_studio = env::var("STOREFRONT_DEV_STUDIO")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.dev_studio);

        let local_slot_fallback = match env::var("STOREFRONT_LOCAL_SLOT_FALLBACK") {
            Ok(value) => value
                .parse()
                .wrap_err("STOREFRONT_LOCAL_SLOT_FALLBACK must be true or false")?,
            Err(_) => defaults.local_slot_fallback,
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            dev_studio,
            local_slot_fallback,
        })
    }

    /// Returns the server address as a string (e.g., "0.0.0.0:3000")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

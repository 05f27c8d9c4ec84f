//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MIRAI_API_BASE` - Base URL of the catalog API; unset means local-only
//!   mode (the storefront runs entirely off the blob store)
//! - `MIRAI_ORDER_PHONE` - WhatsApp number for the checkout handoff
//!   (default: the shop's order line)
//! - `MIRAI_DATA_PATH` - Path for the JSON blob store; unset means state is
//!   kept in memory for the session only

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default destination for checkout messages.
pub const DEFAULT_ORDER_PHONE: &str = "+62895404922012";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API base URL; `None` runs the storefront local-only.
    pub api_base: Option<Url>,
    /// Phone number the checkout deep link is addressed to.
    pub order_phone: String,
    /// Blob store location; `None` keeps state in memory.
    pub data_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `MIRAI_API_BASE` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = match get_optional_env("MIRAI_API_BASE") {
            Some(raw) => Some(Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("MIRAI_API_BASE".to_owned(), e.to_string())
            })?),
            None => None,
        };

        Ok(Self {
            api_base,
            order_phone: get_env_or_default("MIRAI_ORDER_PHONE", DEFAULT_ORDER_PHONE),
            data_path: get_optional_env("MIRAI_DATA_PATH").map(PathBuf::from),
        })
    }

    /// Local-only configuration (no API, in-memory persistence).
    #[must_use]
    pub fn local_only() -> Self {
        Self {
            api_base: None,
            order_phone: DEFAULT_ORDER_PHONE.to_owned(),
            data_path: None,
        }
    }
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_only_defaults() {
        let config = StorefrontConfig::local_only();
        assert!(config.api_base.is_none());
        assert!(config.data_path.is_none());
        assert_eq!(config.order_phone, DEFAULT_ORDER_PHONE);
    }
}

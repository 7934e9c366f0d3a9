//! Environment-driven configuration.
//!
//! The binary loads a `.env` file first, so these variables may come from
//! either the process environment or that file.

use crate::auth::Credentials;
use crate::diagnostics::DEFAULT_LOG_DIR;
use crate::error::ConfigError;
use crate::network::DEFAULT_API_URL;
use std::path::PathBuf;

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET_KEY";
pub const API_URL_VAR: &str = "BINANCE_API_URL";
pub const LOG_DIR_VAR: &str = "ERROR_LOG_DIR";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub base_url: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let api_secret = get(API_SECRET_VAR).ok_or(ConfigError::MissingVar(API_SECRET_VAR))?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
            base_url: get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            log_dir: get(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        })
    }
}

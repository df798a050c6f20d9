//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MEDIA_CLIENT_*)
//! 2. TOML config file (if MEDIA_CLIENT_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MEDIA_CLIENT_*)
/// 2. TOML config file (if MEDIA_CLIENT_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Media API host that document URIs are rewritten to, e.g. `media.example.com`
    /// or `127.0.0.1:8443`.
    ///
    /// Set via MEDIA_CLIENT_HOST environment variable.
    #[serde(default)]
    pub host: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via MEDIA_CLIENT_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MEDIA_CLIENT_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_user_agent() -> String {
    "media-client/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { host: String::new(), user_agent: default_user_agent(), timeout_ms: default_timeout_ms() }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MEDIA_CLIENT_`
    /// 2. TOML file from `MEDIA_CLIENT_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MEDIA_CLIENT_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MEDIA_CLIENT_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into()),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check that a media host is configured (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the host is empty.
    pub fn require_host(&self) -> Result<&str, ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Missing {
                field: "host".into(),
                hint: "Set MEDIA_CLIENT_HOST environment variable".into(),
            });
        }

        Ok(&self.host)
    }
}

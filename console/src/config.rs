//! Configuration management for the inventory console
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with CONSOLE_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Inventory backend configuration
    pub api: ApiConfig,

    pub cascade: CascadeConfig,

    pub cache: CacheConfig,

    pub features: FeatureFlags,

    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the inventory REST backend
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CascadeConfig {
    /// Undo the primary toggle of a transference when its paired half fails
    pub compensate_on_failure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeatureFlags {
    /// Return full field-error maps on validation failures
    pub form_diagnostics: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable ones
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CONSOLE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3100)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("api.base_url", "http://localhost:3000")?
            .set_default("api.timeout_secs", 30)?
            .set_default("cascade.compensate_on_failure", false)?
            .set_default("cache.enabled", true)?
            .set_default("features.form_diagnostics", false)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CONSOLE_ prefix)
            .add_source(
                Environment::with_prefix("CONSOLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// The diagnostics panel is a development-only aid
    pub fn form_diagnostics_enabled(&self) -> bool {
        self.is_development() && self.features.form_diagnostics
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            api: ApiConfig {
                base_url: "http://localhost:3000".to_string(),
                timeout_secs: 30,
            },
            cascade: CascadeConfig {
                compensate_on_failure: false,
            },
            cache: CacheConfig { enabled: true },
            features: FeatureFlags {
                form_diagnostics: false,
            },
            logging: LoggingConfig { json: false },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3100,
            host: "0.0.0.0".to_string(),
        }
    }
}

//! Configuration Loader
//!
//! Environment-aware configuration loading. Handles file discovery, environment detection
//! and layering of defaults, files and environment variables.

use super::error::{ConfigResult, ConfigurationError};
use super::StockmarkConfig;
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Prefix for environment variable overrides (`STOCKMARK__ENGINE__ITEM_TIMEOUT_MS=500`)
pub const ENV_PREFIX: &str = "STOCKMARK";

/// Loaded, validated configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: StockmarkConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    /// This is useful for testing without modifying global environment variables
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::build_layers(&config_directory, environment)?;
        config.validate()?;

        info!(
            environment = environment,
            default_kind = %config.engine.default_kind,
            item_timeout_ms = config.engine.item_timeout_ms,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Wrap an already-built configuration (validated) without touching the filesystem
    pub fn from_config(config: StockmarkConfig, environment: &str) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            environment: environment.to_string(),
            config_directory: Self::default_config_directory(),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &StockmarkConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Effective configuration as JSON, for diagnostics
    pub fn debug_config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    /// Path of the base configuration file inside `dir`
    pub fn base_file(dir: &Path) -> PathBuf {
        dir.join("stockmark.toml")
    }

    /// Path of the environment override file inside `dir`
    pub fn environment_file(dir: &Path, environment: &str) -> PathBuf {
        dir.join(format!("stockmark.{environment}.toml"))
    }

    fn build_layers(dir: &Path, environment: &str) -> ConfigResult<StockmarkConfig> {
        let defaults = Config::try_from(&StockmarkConfig::default())
            .map_err(|e| ConfigurationError::load_failed("defaults", e))?;

        let base = Self::base_file(dir);
        let overrides = Self::environment_file(dir, environment);

        let merged = Config::builder()
            .add_source(defaults)
            .add_source(File::from(base.clone()).required(false))
            .add_source(File::from(overrides.clone()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                ConfigurationError::load_failed(
                    format!("{} + {}", base.display(), overrides.display()),
                    e,
                )
            })?;

        Ok(merged.try_deserialize::<StockmarkConfig>()?)
    }

    /// Detect the runtime environment name
    pub fn detect_environment() -> String {
        env::var("STOCKMARK_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
    }

    /// `STOCKMARK_CONFIG_DIR` when set, else `./config`
    fn default_config_directory() -> PathBuf {
        env::var("STOCKMARK_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }
}

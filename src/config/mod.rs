//! # Stockmark Configuration System
//!
//! Layered configuration built with the `config` crate:
//!
//! 1. built-in defaults ([`StockmarkConfig::default`])
//! 2. `<config_dir>/stockmark.toml` (optional)
//! 3. `<config_dir>/stockmark.<environment>.toml` (optional)
//! 4. `STOCKMARK__<SECTION>__<KEY>` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stockmark_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let timeout = manager.config().engine.item_timeout();
//! let limit = manager.config().catalog.limit;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

use crate::collaborator::CandidateFilter;
use crate::models::AttributeKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure mirroring stockmark.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StockmarkConfig {
    /// Batch execution settings
    pub engine: EngineConfig,

    /// Candidate listing settings
    pub catalog: CatalogConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

/// How the executor treats records that already carry the target attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegeneratePolicy {
    /// Always call the provider; it decides whether to refuse or overwrite
    #[default]
    Delegate,
    /// Record an error without calling the provider
    SkipSatisfied,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operation kind the catalog targets when none is given
    pub default_kind: AttributeKind,
    pub regenerate_policy: RegeneratePolicy,
    /// Per-item generation timeout; 0 disables it
    pub item_timeout_ms: u64,
    pub event_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_kind: AttributeKind::Barcode,
            regenerate_policy: RegeneratePolicy::Delegate,
            item_timeout_ms: 30_000,
            event_channel_capacity: 1000,
        }
    }
}

impl EngineConfig {
    pub fn item_timeout(&self) -> Option<Duration> {
        (self.item_timeout_ms > 0).then(|| Duration::from_millis(self.item_timeout_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub page: u32,
    pub limit: u32,
    /// Use the dedicated "missing" listing when only missing records are wanted
    pub prefer_missing_endpoint: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 100,
            prefer_missing_endpoint: true,
        }
    }
}

impl CatalogConfig {
    /// Candidate filter for the given target and optional search text.
    ///
    /// With `prefer_missing_endpoint` off the source is always asked for every record and
    /// the "missing" narrowing is left to [`crate::catalog::RecordCatalog::filter`].
    pub fn candidate_filter(
        &self,
        kind: AttributeKind,
        search: Option<&str>,
        only_missing: bool,
    ) -> CandidateFilter {
        CandidateFilter {
            page: self.page,
            limit: self.limit,
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            only_missing: only_missing && self.prefer_missing_endpoint,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive overriding the environment default (e.g. `info,stockmark_core=debug`)
    pub level: Option<String>,
}

impl StockmarkConfig {
    /// Validate the configuration for consistency
    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog.page == 0 {
            return Err(ConfigurationError::invalid_value(
                "catalog.page",
                "0",
                "pages are numbered from 1",
            ));
        }

        if self.catalog.limit == 0 {
            return Err(ConfigurationError::invalid_value(
                "catalog.limit",
                "0",
                "limit must be greater than 0",
            ));
        }

        if self.engine.event_channel_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "engine.event_channel_capacity",
                "0",
                "broadcast capacity must be greater than 0",
            ));
        }

        if let Some(level) = &self.logging.level {
            if level.trim().is_empty() {
                return Err(ConfigurationError::invalid_value(
                    "logging.level",
                    level.clone(),
                    "level directive must not be blank",
                ));
            }
        }

        Ok(())
    }
}

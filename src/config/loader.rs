//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the rate table
//! and service settings from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::PensionRate;

use super::types::{EngineConfig, ServiceConfig, TaxRateTable};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/ee/
/// ├── rates.yaml    # Tax rate table (required)
/// └── service.yaml  # Server and assessment settings (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ee").unwrap();
/// println!("Income tax: {}", loader.rates().income_tax);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `rates.yaml` is missing, if any file contains
    /// invalid YAML, or if the rate table fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rates = Self::load_yaml::<TaxRateTable>(&path.join("rates.yaml"))?;
        rates.validate()?;

        let service_path = path.join("service.yaml");
        let service = if service_path.exists() {
            Self::load_yaml::<ServiceConfig>(&service_path)?
        } else {
            debug!(path = %service_path.display(), "No service.yaml, using defaults");
            ServiceConfig::default()
        };

        info!(
            path = %path.display(),
            assessment_enabled = service.assessment.enabled,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(rates, service),
        })
    }

    /// Returns the built-in Estonian rates with default service settings.
    pub fn estonian_defaults() -> Self {
        Self {
            config: EngineConfig::new(TaxRateTable::estonian(), ServiceConfig::default()),
        }
    }

    /// Wraps an already-built configuration, validating its rate table.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.rates().validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the tax rate table.
    pub fn rates(&self) -> &TaxRateTable {
        self.config.rates()
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        self.config.service()
    }

    /// Gets the pension contribution rate for a tier.
    pub fn get_pension_rate(&self, tier: PensionRate) -> EngineResult<Decimal> {
        self.rates().pension_rate(tier)
    }
}

//! Configuration loading and management for the salary engine.
//!
//! This module loads the tax rate table and service settings from YAML files,
//! or falls back to the built-in Estonian rates.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ee").unwrap();
//! println!("Social tax: {}", config.rates().social_tax);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AssessmentConfig, EngineConfig, ServerConfig, ServiceConfig, TaxRateTable};

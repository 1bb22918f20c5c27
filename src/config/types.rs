//! Configuration types for salary conversion.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::PensionRate;

/// The statutory rates used by every conversion.
///
/// Rates are fractions of gross salary (0.22 means 22%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRateTable {
    /// Income tax rate applied to the income tax base.
    pub income_tax: Decimal,
    /// Social tax rate paid by the employer.
    pub social_tax: Decimal,
    /// Unemployment insurance rate withheld from the employee.
    pub unemployment_employee: Decimal,
    /// Unemployment insurance rate paid by the employer.
    pub unemployment_employer: Decimal,
    /// Pension contribution rate for each second pillar tier.
    pub pension_rates: BTreeMap<PensionRate, Decimal>,
}

impl TaxRateTable {
    /// Returns the built-in Estonian rate table.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::TaxRateTable;
    /// use salary_engine::models::PensionRate;
    /// use rust_decimal_macros::dec;
    ///
    /// let table = TaxRateTable::estonian();
    /// assert_eq!(table.income_tax, dec!(0.22));
    /// assert_eq!(table.pension_rate(PensionRate::Four).unwrap(), dec!(0.04));
    /// ```
    pub fn estonian() -> Self {
        let pension_rates = BTreeMap::from([
            (PensionRate::NotJoined, dec!(0)),
            (PensionRate::Two, dec!(0.02)),
            (PensionRate::Four, dec!(0.04)),
            (PensionRate::Six, dec!(0.06)),
        ]);

        Self {
            income_tax: dec!(0.22),
            social_tax: dec!(0.33),
            unemployment_employee: dec!(0.016),
            unemployment_employer: dec!(0.008),
            pension_rates,
        }
    }

    /// Looks up the contribution rate for a pension tier.
    pub fn pension_rate(&self, tier: PensionRate) -> EngineResult<Decimal> {
        self.pension_rates
            .get(&tier)
            .copied()
            .ok_or_else(|| EngineError::PensionRateNotConfigured {
                selector: tier.to_string(),
            })
    }

    /// Checks that the table describes strictly increasing forward formulas.
    ///
    /// Every rate must lie in `[0, 1)`, every tier must be present, and the
    /// employee-side withholding of each tier must stay below 100%.
    pub fn validate(&self) -> EngineResult<()> {
        check_rate("income_tax", self.income_tax)?;
        check_rate("social_tax", self.social_tax)?;
        check_rate("unemployment_employee", self.unemployment_employee)?;
        check_rate("unemployment_employer", self.unemployment_employer)?;

        for tier in PensionRate::ALL {
            let field = format!("pension_rates.{}", tier);
            let rate = self
                .pension_rates
                .get(&tier)
                .copied()
                .ok_or_else(|| EngineError::InvalidConfig {
                    field: field.clone(),
                    message: "tier is missing".to_string(),
                })?;
            check_rate(&field, rate)?;

            if rate + self.unemployment_employee >= Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field,
                    message: "pension and employee unemployment rates must total below 1"
                        .to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for TaxRateTable {
    fn default() -> Self {
        Self::estonian()
    }
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate >= Decimal::ONE {
        return Err(EngineError::InvalidConfig {
            field: field.to_string(),
            message: format!("rate {} must be at least 0 and below 1", rate),
        });
    }
    Ok(())
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Settings for the external salary assessment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Whether assessments are requested at all.
    #[serde(default)]
    pub enabled: bool,
    /// Chat completions endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name sent with each request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Service configuration file structure (`service.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Assessment call settings.
    #[serde(default)]
    pub assessment: AssessmentConfig,
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    rates: TaxRateTable,
    service: ServiceConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(rates: TaxRateTable, service: ServiceConfig) -> Self {
        Self { rates, service }
    }

    /// Returns the tax rate table.
    pub fn rates(&self) -> &TaxRateTable {
        &self.rates
    }

    /// Returns the service settings.
    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }
}

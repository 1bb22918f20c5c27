//! Conversion result models for the salary engine.
//!
//! This module contains the [`ConversionResult`] type and the audit structures
//! that record how a conversion was carried out.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All salary figures produced by a conversion.
///
/// Every field is a non-negative amount in EUR carried at exactly two
/// decimal places, so it serializes as e.g. `"1000.00"`.
///
/// # Example
///
/// ```
/// use salary_engine::models::ConversionResult;
/// use rust_decimal_macros::dec;
///
/// let result = ConversionResult {
///     gross: dec!(1000.00),
///     net: dec!(751.92),
///     employer_cost: dec!(1338.00),
///     income_tax: dec!(212.08),
///     social_tax: dec!(330.00),
///     pension_contribution: dec!(20.00),
///     unemployment_employee: dec!(16.00),
///     unemployment_employer: dec!(8.00),
/// };
/// assert!(result.is_ordered());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Gross salary.
    pub gross: Decimal,
    /// Net (take-home) salary.
    pub net: Decimal,
    /// Total cost to the employer.
    pub employer_cost: Decimal,
    /// Income tax withheld from the employee.
    pub income_tax: Decimal,
    /// Social tax paid by the employer.
    pub social_tax: Decimal,
    /// Second pillar pension contribution withheld from the employee.
    pub pension_contribution: Decimal,
    /// Unemployment insurance withheld from the employee.
    pub unemployment_employee: Decimal,
    /// Unemployment insurance paid by the employer.
    pub unemployment_employer: Decimal,
}

impl ConversionResult {
    /// Returns true when `net <= gross <= employer_cost`.
    pub fn is_ordered(&self) -> bool {
        self.net <= self.gross && self.gross <= self.employer_cost
    }

    /// Sum of everything withheld from the employee's gross salary.
    pub fn employee_deductions(&self) -> Decimal {
        self.income_tax + self.pension_contribution + self.unemployment_employee
    }

    /// Sum of everything the employer pays on top of gross salary.
    pub fn employer_contributions(&self) -> Decimal {
        self.social_tax + self.unemployment_employer
    }
}

/// A single step in the audit trace recording a conversion decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of conversion steps.
    pub steps: Vec<AuditStep>,
    /// The total conversion duration in microseconds.
    pub duration_us: u64,
}

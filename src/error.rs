//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while converting salaries.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the salary engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::InvalidAmount {
///     input: "abc".to_string(),
///     message: "not a number".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid amount 'abc': not a number");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied amount was non-numeric, zero, negative or too large.
    #[error("Invalid amount '{input}': {message}")]
    InvalidAmount {
        /// The raw input that was rejected.
        input: String,
        /// A description of why the amount was rejected.
        message: String,
    },

    /// The pension selector is not one of the supported tiers.
    #[error("Invalid pension rate selector: {selector}")]
    InvalidPensionRate {
        /// The selector that was not recognised.
        selector: String,
    },

    /// The rate table has no entry for a pension selector.
    #[error("Pension rate not configured for selector: {selector}")]
    PensionRateNotConfigured {
        /// The selector missing from the table.
        selector: String,
    },

    /// Gross salary could not be resolved from the known quantity.
    #[error("Failed to resolve gross salary from {quantity} {target} after {iterations} iterations")]
    UnresolvedInversion {
        /// The known quantity that was being inverted.
        quantity: String,
        /// The target value of the known quantity.
        target: Decimal,
        /// The number of iterations performed before giving up.
        iterations: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The external assessment call failed.
    #[error("Assessment failed: {message}")]
    AssessmentFailed {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Conversion request model and related types.
//!
//! This module defines the [`ConversionRequest`] struct together with the
//! [`KnownQuantity`] and [`PensionRate`] enums describing what the caller knows.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The largest amount the engine accepts.
///
/// Keeps the bisection bracket (up to three times the amount, doubled on
/// expansion) well inside the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Identifies which of the three salary totals the supplied amount represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownQuantity {
    /// Gross salary agreed between employer and employee.
    #[serde(rename = "gross")]
    Gross,
    /// Net (take-home) salary.
    #[serde(rename = "net")]
    Net,
    /// Total cost to the employer.
    #[serde(rename = "employer")]
    EmployerCost,
}

impl KnownQuantity {
    /// Returns the wire name of the quantity.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownQuantity::Gross => "gross",
            KnownQuantity::Net => "net",
            KnownQuantity::EmployerCost => "employer",
        }
    }
}

impl fmt::Display for KnownQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The second pension pillar contribution tier chosen by the employee.
///
/// The selector strings "0", "2", "4" and "6" are the percentage of gross
/// salary withheld.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PensionRate {
    /// Not joined, no contribution.
    #[serde(rename = "0")]
    NotJoined,
    /// 2% contribution.
    #[serde(rename = "2")]
    Two,
    /// 4% contribution.
    #[serde(rename = "4")]
    Four,
    /// 6% contribution.
    #[default]
    #[serde(rename = "6")]
    Six,
}

impl PensionRate {
    /// All supported tiers in ascending order.
    pub const ALL: [PensionRate; 4] = [
        PensionRate::NotJoined,
        PensionRate::Two,
        PensionRate::Four,
        PensionRate::Six,
    ];

    /// Returns the selector string for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            PensionRate::NotJoined => "0",
            PensionRate::Two => "2",
            PensionRate::Four => "4",
            PensionRate::Six => "6",
        }
    }
}

impl fmt::Display for PensionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PensionRate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(PensionRate::NotJoined),
            "2" => Ok(PensionRate::Two),
            "4" => Ok(PensionRate::Four),
            "6" => Ok(PensionRate::Six),
            other => Err(EngineError::InvalidPensionRate {
                selector: other.to_string(),
            }),
        }
    }
}

/// A request to derive all salary figures from one known amount.
///
/// # Example
///
/// ```
/// use salary_engine::models::{ConversionRequest, KnownQuantity, PensionRate};
///
/// let request = ConversionRequest::parse("1000", KnownQuantity::Gross, PensionRate::Two, true)?;
/// assert_eq!(request.amount.to_string(), "1000");
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// The known amount in EUR. Always greater than zero.
    pub amount: Decimal,
    /// Which quantity `amount` represents.
    pub quantity: KnownQuantity,
    /// The pension pillar tier.
    pub pension: PensionRate,
    /// Whether unemployment insurance is withheld and paid.
    pub include_unemployment: bool,
}

impl ConversionRequest {
    /// Creates a request from an already-parsed amount.
    ///
    /// Returns `InvalidAmount` if the amount is zero, negative or above
    /// [`MAX_AMOUNT`].
    pub fn new(
        amount: Decimal,
        quantity: KnownQuantity,
        pension: PensionRate,
        include_unemployment: bool,
    ) -> EngineResult<Self> {
        validate_amount(amount, &amount.to_string())?;
        Ok(Self {
            amount,
            quantity,
            pension,
            include_unemployment,
        })
    }

    /// Creates a request from user-entered text.
    ///
    /// Empty, non-numeric, zero and negative inputs are rejected with
    /// `InvalidAmount`; nothing is ever treated as zero.
    pub fn parse(
        amount: &str,
        quantity: KnownQuantity,
        pension: PensionRate,
        include_unemployment: bool,
    ) -> EngineResult<Self> {
        let parsed = parse_amount(amount)?;
        Self::new(parsed, quantity, pension, include_unemployment)
    }

    /// Re-checks the amount invariant for requests built field by field.
    pub fn validate(&self) -> EngineResult<()> {
        validate_amount(self.amount, &self.amount.to_string())
    }
}

/// Parses a user-entered amount string into a [`Decimal`].
pub fn parse_amount(input: &str) -> EngineResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount {
            input: input.to_string(),
            message: "amount is required".to_string(),
        });
    }

    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| EngineError::InvalidAmount {
            input: input.to_string(),
            message: "amount is not a number".to_string(),
        })?;

    validate_amount(amount, input)?;
    Ok(amount)
}

fn validate_amount(amount: Decimal, input: &str) -> EngineResult<()> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            input: input.to_string(),
            message: "amount must be greater than zero".to_string(),
        });
    }
    if amount > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount {
            input: input.to_string(),
            message: format!("amount must not exceed {}", MAX_AMOUNT),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid_amount(input: &str) {
        match parse_amount(input) {
            Err(EngineError::InvalidAmount { input: rejected, .. }) => {
                assert_eq!(rejected, input);
            }
            other => panic!("Expected InvalidAmount for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_parse_plain_amount() {
        assert_eq!(parse_amount("1000").unwrap(), dec!(1000));
        assert_eq!(parse_amount(" 751.92 ").unwrap(), dec!(751.92));
    }

    #[test]
    fn test_parse_scientific_amount() {
        assert_eq!(parse_amount("1e3").unwrap(), dec!(1000));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_invalid_amount("-5");
    }

    #[test]
    fn test_empty_amount_rejected() {
        assert_invalid_amount("");
        assert_invalid_amount("   ");
    }

    #[test]
    fn test_non_numeric_amount_rejected() {
        assert_invalid_amount("abc");
        assert_invalid_amount("12.5.0");
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert_invalid_amount("0");
        assert_invalid_amount("0.00");
    }

    #[test]
    fn test_amount_above_maximum_rejected() {
        assert_invalid_amount("1000000000000.01");
        assert!(parse_amount("1000000000000").is_ok());
    }

    #[test]
    fn test_new_rejects_non_positive_amount() {
        let result = ConversionRequest::new(
            Decimal::ZERO,
            KnownQuantity::Gross,
            PensionRate::Two,
            true,
        );
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    #[test]
    fn test_validate_catches_field_mutation() {
        let mut request =
            ConversionRequest::parse("100", KnownQuantity::Net, PensionRate::Six, true).unwrap();
        assert!(request.validate().is_ok());
        request.amount = dec!(-1);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_pension_rate_from_str() {
        assert_eq!("0".parse::<PensionRate>().unwrap(), PensionRate::NotJoined);
        assert_eq!("2".parse::<PensionRate>().unwrap(), PensionRate::Two);
        assert_eq!("4".parse::<PensionRate>().unwrap(), PensionRate::Four);
        assert_eq!("6".parse::<PensionRate>().unwrap(), PensionRate::Six);
    }

    #[test]
    fn test_pension_rate_from_str_rejects_unknown_tier() {
        match "3".parse::<PensionRate>() {
            Err(EngineError::InvalidPensionRate { selector }) => assert_eq!(selector, "3"),
            other => panic!("Expected InvalidPensionRate, got {:?}", other),
        }
    }

    #[test]
    fn test_pension_rate_serialization() {
        assert_eq!(serde_json::to_string(&PensionRate::Four).unwrap(), "\"4\"");
        let rate: PensionRate = serde_json::from_str("\"0\"").unwrap();
        assert_eq!(rate, PensionRate::NotJoined);
    }

    #[test]
    fn test_known_quantity_serialization() {
        assert_eq!(
            serde_json::to_string(&KnownQuantity::EmployerCost).unwrap(),
            "\"employer\""
        );
        let quantity: KnownQuantity = serde_json::from_str("\"net\"").unwrap();
        assert_eq!(quantity, KnownQuantity::Net);
    }

    #[test]
    fn test_default_pension_rate_is_six() {
        assert_eq!(PensionRate::default(), PensionRate::Six);
    }
}

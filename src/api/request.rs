//! Request types for the salary engine API.
//!
//! This module defines the JSON request structures for the `/convert` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{ConversionRequest, KnownQuantity, PensionRate};

/// An amount as sent by a client: either the text typed into a form or a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// Amount entered as text, e.g. `"1000.50"`.
    Text(String),
    /// Amount sent as a JSON number.
    Number(serde_json::Number),
}

impl AmountInput {
    /// Returns the amount as text for parsing.
    pub fn as_text(&self) -> String {
        match self {
            AmountInput::Text(text) => text.clone(),
            AmountInput::Number(number) => number.to_string(),
        }
    }
}

/// Request body for the `/convert` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// The known amount in EUR.
    pub amount: AmountInput,
    /// Which quantity the amount represents: "gross", "net" or "employer".
    pub quantity: KnownQuantity,
    /// Pension pillar selector ("0", "2", "4" or "6"). Defaults to "6".
    #[serde(default)]
    pub pension: Option<String>,
    /// Whether unemployment insurance applies. Defaults to true.
    #[serde(default = "default_include_unemployment")]
    pub include_unemployment: bool,
    /// Whether to request an assessment of the result.
    #[serde(default)]
    pub assess: bool,
    /// Groups successive conversions whose assessments supersede each other.
    #[serde(default)]
    pub session_id: Option<String>,
}

fn default_include_unemployment() -> bool {
    true
}

impl ConvertRequest {
    /// Validates the request into a domain [`ConversionRequest`].
    pub fn to_conversion_request(&self) -> EngineResult<ConversionRequest> {
        let pension = match &self.pension {
            Some(selector) => selector.parse::<PensionRate>()?,
            None => PensionRate::default(),
        };

        ConversionRequest::parse(
            &self.amount.as_text(),
            self.quantity,
            pension,
            self.include_unemployment,
        )
    }
}

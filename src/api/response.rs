//! Response types for the salary engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::{ASSESSMENT_FALLBACK_MESSAGE, AssessmentOutcome};
use crate::error::EngineError;
use crate::models::{AuditTrace, ConversionRequest, ConversionResult};

/// Response body for a successful `/convert` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertResponse {
    /// Unique identifier for this conversion, also used as log correlation id.
    pub conversion_id: Uuid,
    /// When the conversion was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the conversion.
    pub engine_version: String,
    /// The validated request.
    pub request: ConversionRequest,
    /// The rounded salary figures.
    pub result: ConversionResult,
    /// Steps taken to produce the result.
    pub audit_trace: AuditTrace,
    /// Assessment of the result, when one was requested.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assessment: Option<AssessmentOutcome>,
}

/// Response body for a successful `/assess` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessResponse {
    /// The assessment text.
    pub assessment: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidAmount { input, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    format!("Invalid amount '{}'", input),
                    message,
                ),
            },
            EngineError::InvalidPensionRate { selector } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PENSION_RATE",
                    format!("Invalid pension rate selector: {}", selector),
                    "Supported selectors are \"0\", \"2\", \"4\" and \"6\"",
                ),
            },
            EngineError::PensionRateNotConfigured { selector } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Pension rate not configured for selector: {}", selector),
                ),
            },
            err @ EngineError::UnresolvedInversion { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    err.to_string(),
                ),
            },
            err @ (EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. }) => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", err.to_string()),
            },
            EngineError::AssessmentFailed { message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "ASSESSMENT_FAILED",
                    ASSESSMENT_FALLBACK_MESSAGE,
                    message,
                ),
            },
        }
    }
}

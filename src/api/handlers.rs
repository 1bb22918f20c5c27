//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assessment::{ASSESSMENT_FALLBACK_MESSAGE, AssessmentOutcome};
use crate::calculation::convert_traced;
use crate::error::EngineError;
use crate::models::ConversionResult;

use super::request::ConvertRequest;
use super::response::{ApiError, ApiErrorResponse, AssessResponse, ConvertResponse};
use super::state::AppState;

/// Version reported with every conversion.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/convert", post(convert_handler))
        .route("/assess", post(assess_handler))
        .route("/rates", get(rates_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /convert endpoint.
///
/// Accepts one known salary figure and returns all derived figures, with an
/// assessment when the request asks for one.
async fn convert_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing conversion request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let conversion_request = match request.to_conversion_request() {
        Ok(conversion_request) => conversion_request,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Conversion request rejected"
            );
            return error_response(err);
        }
    };

    let traced = match convert_traced(&conversion_request, state.config().rates()) {
        Ok(traced) => traced,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Conversion failed"
            );
            return error_response(err);
        }
    };

    info!(
        correlation_id = %correlation_id,
        quantity = %conversion_request.quantity,
        pension = %conversion_request.pension,
        gross = %traced.result.gross,
        net = %traced.result.net,
        employer_cost = %traced.result.employer_cost,
        duration_us = traced.audit_trace.duration_us,
        "Conversion completed successfully"
    );

    let assessment = if request.assess {
        let session_id = request
            .session_id
            .clone()
            .unwrap_or_else(|| correlation_id.to_string());
        let outcome = match state.scheduler().run(&session_id, traced.result.clone()).await {
            AssessmentOutcome::Failed(reason) => {
                warn!(
                    correlation_id = %correlation_id,
                    session_id = %session_id,
                    error = %reason,
                    "Assessment unavailable"
                );
                AssessmentOutcome::Failed(ASSESSMENT_FALLBACK_MESSAGE.to_string())
            }
            outcome => outcome,
        };
        Some(outcome)
    } else {
        None
    };

    let response = ConvertResponse {
        conversion_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        request: conversion_request,
        result: traced.result,
        audit_trace: traced.audit_trace,
        assessment,
    };

    json_response(StatusCode::OK, response)
}

/// Handler for POST /assess endpoint.
///
/// Requests an assessment of an already computed result.
async fn assess_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConversionResult>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing assessment request");

    let result = match payload {
        Ok(Json(result)) => result,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.scheduler().assessor().assess(&result).await {
        Ok(assessment) => {
            info!(
                correlation_id = %correlation_id,
                gross = %result.gross,
                "Assessment completed"
            );
            json_response(StatusCode::OK, AssessResponse { assessment })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Assessment failed"
            );
            error_response(err)
        }
    }
}

/// Handler for GET /rates endpoint.
async fn rates_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().rates())
}

/// Handler for GET /health endpoint.
async fn health_handler() -> Response {
    json_response(StatusCode::OK, json!({ "status": "ok" }))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

//! HTTP API module for the salary engine.
//!
//! This module provides the REST API endpoints for converting between
//! gross salary, net salary and total employer cost.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::{AmountInput, ConvertRequest};
pub use response::{ApiError, ApiErrorResponse, AssessResponse, ConvertResponse};
pub use state::AppState;

//! Core data models for the salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod conversion_request;
mod conversion_result;

pub use conversion_request::{
    ConversionRequest, KnownQuantity, MAX_AMOUNT, PensionRate, parse_amount,
};
pub use conversion_result::{AuditStep, AuditTrace, ConversionResult};

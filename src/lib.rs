//! Salary Engine for Estonian payroll
//!
//! This crate converts between gross salary, net salary and total employer cost
//! under the Estonian tax and contribution rules, and optionally asks an external
//! text-generation service for a short assessment of the result.

#![warn(missing_docs)]

pub mod api;
pub mod assessment;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

//! Calculation logic for the salary engine.
//!
//! This module contains the forward payroll formulas, the bisection search
//! that resolves gross salary from net salary or employer cost, currency
//! rounding, and the conversion entry points that tie them together.

mod conversion;
mod forward;
mod inversion;
mod rounding;

pub use conversion::{TracedConversion, convert, convert_traced};
pub use forward::{
    AppliedRates, TaxBreakdown, breakdown, employer_cost_from_gross, net_from_gross,
};
pub use inversion::{
    BISECTION_TOLERANCE, MAX_BISECTION_ITERATIONS, MAX_BRACKET_EXPANSIONS, Resolution,
    gross_from_employer_cost, gross_from_net,
};
pub use rounding::{MONEY_SCALE, round_money};

//! Resolving gross salary from net salary or employer cost.
//!
//! The forward formulas are strictly increasing in gross, so the gross salary
//! behind a known net or employer cost is unique and is found by bisection.
//! Each search starts from a heuristic bracket, widens it if the bracket turns
//! out not to contain the target, and stops once the bracket is one cent wide.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::KnownQuantity;

use super::forward::{AppliedRates, employer_cost_from_gross, net_from_gross};

/// Bisection stops once the bracket is at most this wide.
pub const BISECTION_TOLERANCE: Decimal = dec!(0.01);

/// Hard cap on bisection steps.
///
/// The largest accepted amount needs fewer than 70 steps even after the
/// bracket has been widened the maximum number of times.
pub const MAX_BISECTION_ITERATIONS: u32 = 128;

/// How many times a bracket bound may be doubled or halved to contain the target.
pub const MAX_BRACKET_EXPANSIONS: u32 = 16;

/// A gross salary found by bisection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The midpoint of the final bracket.
    pub gross: Decimal,
    /// Number of bisection steps taken.
    pub iterations: u32,
    /// Number of times the initial bracket had to be widened.
    pub bracket_expansions: u32,
}

/// Finds the gross salary whose net salary equals `net`.
///
/// The search starts from `[net, net * 3]`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{AppliedRates, gross_from_net};
/// use salary_engine::config::TaxRateTable;
/// use salary_engine::models::PensionRate;
/// use rust_decimal_macros::dec;
///
/// let rates = AppliedRates::select(&TaxRateTable::estonian(), PensionRate::Two, true).unwrap();
/// let resolution = gross_from_net(dec!(751.92), &rates).unwrap();
/// assert!((resolution.gross - dec!(1000)).abs() <= dec!(0.01));
/// ```
pub fn gross_from_net(net: Decimal, rates: &AppliedRates) -> EngineResult<Resolution> {
    bisect(
        KnownQuantity::Net,
        net,
        net,
        net * dec!(3),
        |gross| net_from_gross(gross, rates),
    )
}

/// Finds the gross salary whose employer cost equals `employer_cost`.
///
/// The search starts from `[employer_cost * 0.5, employer_cost]`.
pub fn gross_from_employer_cost(
    employer_cost: Decimal,
    rates: &AppliedRates,
) -> EngineResult<Resolution> {
    bisect(
        KnownQuantity::EmployerCost,
        employer_cost,
        employer_cost * dec!(0.5),
        employer_cost,
        |gross| employer_cost_from_gross(gross, rates),
    )
}

fn bisect<F>(
    quantity: KnownQuantity,
    target: Decimal,
    min: Decimal,
    max: Decimal,
    forward: F,
) -> EngineResult<Resolution>
where
    F: Fn(Decimal) -> Decimal,
{
    let unresolved = |iterations| EngineError::UnresolvedInversion {
        quantity: quantity.to_string(),
        target,
        iterations,
    };

    if target <= Decimal::ZERO {
        return Err(unresolved(0));
    }

    let (mut min, mut max, bracket_expansions) =
        widen_bracket(target, min, max, &forward).ok_or_else(|| unresolved(0))?;

    if bracket_expansions > 0 {
        warn!(
            quantity = %quantity,
            target = %target,
            bracket_expansions,
            "Initial bisection bracket did not contain the target"
        );
    }

    let mut iterations = 0;
    while max - min > BISECTION_TOLERANCE {
        if iterations == MAX_BISECTION_ITERATIONS {
            return Err(unresolved(iterations));
        }
        iterations += 1;

        let estimated_gross = (min + max) / dec!(2);
        if forward(estimated_gross) < target {
            min = estimated_gross;
        } else {
            max = estimated_gross;
        }
    }

    let gross = (min + max) / dec!(2);
    if gross <= Decimal::ZERO {
        return Err(unresolved(iterations));
    }

    debug!(
        quantity = %quantity,
        target = %target,
        gross = %gross,
        iterations,
        "Resolved gross salary"
    );

    Ok(Resolution {
        gross,
        iterations,
        bracket_expansions,
    })
}

/// Moves the bracket bounds outwards until `forward(min) <= target <= forward(max)`.
///
/// Returns `None` when the target is still outside after the expansion limit.
fn widen_bracket<F>(
    target: Decimal,
    mut min: Decimal,
    mut max: Decimal,
    forward: &F,
) -> Option<(Decimal, Decimal, u32)>
where
    F: Fn(Decimal) -> Decimal,
{
    let mut expansions = 0;

    while forward(min) > target {
        if expansions == MAX_BRACKET_EXPANSIONS {
            return None;
        }
        max = min;
        min /= dec!(2);
        expansions += 1;
    }

    while forward(max) < target {
        if expansions == MAX_BRACKET_EXPANSIONS {
            return None;
        }
        min = max;
        max = max.checked_mul(dec!(2))?;
        expansions += 1;
    }

    Some((min, max, expansions))
}

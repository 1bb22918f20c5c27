//! Conversion dispatch and result assembly.
//!
//! A conversion resolves gross salary from whichever quantity is known, then
//! re-derives every other figure from that gross with the forward formulas
//! and rounds each one to cents. The known quantity is reported as supplied.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxRateTable;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, ConversionRequest, ConversionResult, KnownQuantity};

use super::forward::{AppliedRates, TaxBreakdown, breakdown};
use super::inversion::{Resolution, gross_from_employer_cost, gross_from_net};
use super::rounding::round_money;

/// A conversion result together with the audit trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracedConversion {
    /// The rounded salary figures.
    pub result: ConversionResult,
    /// The unrounded forward evaluation at the resolved gross.
    pub breakdown: TaxBreakdown,
    /// Every step taken to produce the result.
    pub audit_trace: AuditTrace,
}

/// Converts one known salary figure into all the others.
///
/// # Errors
///
/// - `InvalidAmount` if the request amount is not positive
/// - `PensionRateNotConfigured` if the table lacks the requested tier
/// - `UnresolvedInversion` if gross salary cannot be resolved
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::convert;
/// use salary_engine::config::TaxRateTable;
/// use salary_engine::models::{ConversionRequest, KnownQuantity, PensionRate};
///
/// let request = ConversionRequest::parse("1000", KnownQuantity::Gross, PensionRate::Two, true)?;
/// let result = convert(&request, &TaxRateTable::estonian())?;
/// assert_eq!(result.net.to_string(), "751.92");
/// assert_eq!(result.employer_cost.to_string(), "1338.00");
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
pub fn convert(request: &ConversionRequest, table: &TaxRateTable) -> EngineResult<ConversionResult> {
    convert_traced(request, table).map(|traced| traced.result)
}

/// Converts one known salary figure and records an audit trace of the steps.
pub fn convert_traced(
    request: &ConversionRequest,
    table: &TaxRateTable,
) -> EngineResult<TracedConversion> {
    let start_time = Instant::now();
    request.validate()?;

    let mut steps = Vec::with_capacity(3);

    let rates = AppliedRates::select(table, request.pension, request.include_unemployment)?;
    steps.push(rate_selection_step(1, request, &rates));

    let resolution = match request.quantity {
        KnownQuantity::Gross => None,
        KnownQuantity::Net => Some(gross_from_net(request.amount, &rates)?),
        KnownQuantity::EmployerCost => Some(gross_from_employer_cost(request.amount, &rates)?),
    };
    let gross = resolution.map_or(request.amount, |r| r.gross);
    steps.push(gross_resolution_step(2, request, gross, resolution.as_ref()));

    let breakdown = breakdown(gross, &rates);
    let result = assemble(request, &breakdown);
    steps.push(assembly_step(3, &result));

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        quantity = %request.quantity,
        amount = %request.amount,
        gross = %result.gross,
        duration_us,
        "Conversion completed"
    );

    Ok(TracedConversion {
        result,
        breakdown,
        audit_trace: AuditTrace { steps, duration_us },
    })
}

fn assemble(request: &ConversionRequest, b: &TaxBreakdown) -> ConversionResult {
    let (gross, net, employer_cost) = match request.quantity {
        KnownQuantity::Gross => (request.amount, b.net, b.employer_cost),
        KnownQuantity::Net => (b.gross, request.amount, b.employer_cost),
        KnownQuantity::EmployerCost => (b.gross, b.net, request.amount),
    };

    ConversionResult {
        gross: round_money(gross),
        net: round_money(net),
        employer_cost: round_money(employer_cost),
        income_tax: round_money(b.income_tax),
        social_tax: round_money(b.social_tax),
        pension_contribution: round_money(b.pension_contribution),
        unemployment_employee: round_money(b.unemployment_employee),
        unemployment_employer: round_money(b.unemployment_employer),
    }
}

fn rate_selection_step(
    step_number: u32,
    request: &ConversionRequest,
    rates: &AppliedRates,
) -> AuditStep {
    let unemployment_note = if request.include_unemployment {
        "unemployment insurance included"
    } else {
        "unemployment insurance excluded"
    };

    AuditStep {
        step_number,
        rule_id: "rate_selection".to_string(),
        rule_name: "Rate Selection".to_string(),
        input: serde_json::json!({
            "pension": request.pension.as_str(),
            "include_unemployment": request.include_unemployment
        }),
        output: serde_json::json!({
            "income_tax": rates.income_tax.normalize().to_string(),
            "social_tax": rates.social_tax.normalize().to_string(),
            "pension": rates.pension.normalize().to_string(),
            "unemployment_employee": rates.unemployment_employee.normalize().to_string(),
            "unemployment_employer": rates.unemployment_employer.normalize().to_string()
        }),
        reasoning: format!(
            "Pension tier {} withholds {}, {}",
            request.pension,
            rates.pension.normalize(),
            unemployment_note
        ),
    }
}

fn gross_resolution_step(
    step_number: u32,
    request: &ConversionRequest,
    gross: Decimal,
    resolution: Option<&Resolution>,
) -> AuditStep {
    let input = serde_json::json!({
        "quantity": request.quantity.as_str(),
        "amount": request.amount.to_string()
    });

    match resolution {
        None => AuditStep {
            step_number,
            rule_id: "gross_resolution".to_string(),
            rule_name: "Gross Resolution".to_string(),
            input,
            output: serde_json::json!({
                "gross": gross.to_string(),
                "method": "direct"
            }),
            reasoning: "Gross salary supplied directly".to_string(),
        },
        Some(resolution) => AuditStep {
            step_number,
            rule_id: "gross_resolution".to_string(),
            rule_name: "Gross Resolution".to_string(),
            input,
            output: serde_json::json!({
                "gross": gross.to_string(),
                "method": "bisection",
                "iterations": resolution.iterations,
                "bracket_expansions": resolution.bracket_expansions
            }),
            reasoning: format!(
                "Bisected gross salary from {} {} in {} iterations",
                request.quantity, request.amount, resolution.iterations
            ),
        },
    }
}

fn assembly_step(step_number: u32, result: &ConversionResult) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "result_assembly".to_string(),
        rule_name: "Result Assembly".to_string(),
        input: serde_json::json!({
            "gross": result.gross.to_string()
        }),
        output: serde_json::json!({
            "net": result.net.to_string(),
            "employer_cost": result.employer_cost.to_string()
        }),
        reasoning: format!(
            "€{} - €{} deductions = €{} net; €{} + €{} contributions = €{} employer cost",
            result.gross,
            result.employee_deductions(),
            result.net,
            result.gross,
            result.employer_contributions(),
            result.employer_cost
        ),
    }
}

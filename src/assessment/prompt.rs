//! Prompt construction for salary assessments.

use crate::models::ConversionResult;

/// System message framing the assistant as an Estonian salary adviser.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful financial advisor with expertise in Estonian salaries and living costs.";

/// Builds the user prompt describing a conversion result.
///
/// # Examples
///
/// ```
/// use salary_engine::assessment::build_prompt;
/// use salary_engine::models::ConversionResult;
/// use rust_decimal_macros::dec;
///
/// let result = ConversionResult {
///     gross: dec!(1000.00),
///     net: dec!(751.92),
///     employer_cost: dec!(1338.00),
///     income_tax: dec!(212.08),
///     social_tax: dec!(330.00),
///     pension_contribution: dec!(20.00),
///     unemployment_employee: dec!(16.00),
///     unemployment_employer: dec!(8.00),
/// };
/// assert!(build_prompt(&result).contains("Net Salary (Netopalk): 751.92 EUR"));
/// ```
pub fn build_prompt(result: &ConversionResult) -> String {
    format!(
        "Analyze the following salary information in the Estonian context:\n\
         - Gross Salary (Brutopalk): {gross} EUR\n\
         - Net Salary (Netopalk): {net} EUR\n\
         - Total Employer Cost: {employer_cost} EUR\n\
         \n\
         Tax breakdown:\n\
         - Income Tax: {income_tax} EUR\n\
         - Social Tax: {social_tax} EUR\n\
         - Pension Contribution: {pension} EUR\n\
         - Employee Unemployment Insurance: {unemployment_employee} EUR\n\
         - Employer Unemployment Insurance: {unemployment_employer} EUR\n\
         \n\
         Please provide a brief assessment (2-3 sentences) about this salary level in Estonia. \
         Consider the standard of living, average salaries in Estonia, and what kind of \
         lifestyle this salary might afford.",
        gross = result.gross,
        net = result.net,
        employer_cost = result.employer_cost,
        income_tax = result.income_tax,
        social_tax = result.social_tax,
        pension = result.pension_contribution,
        unemployment_employee = result.unemployment_employee,
        unemployment_employer = result.unemployment_employer,
    )
}

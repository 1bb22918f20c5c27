//! Forward formulas from gross salary to every other figure.
//!
//! This module evaluates the Estonian payroll formulas for a known gross
//! salary. Both [`net_from_gross`] and [`employer_cost_from_gross`] are strictly
//! increasing in gross for any validated rate table, which is what lets the
//! inversion module resolve gross salary by bisection.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::TaxRateTable;
use crate::error::EngineResult;
use crate::models::PensionRate;

/// The rates that apply to one conversion after selecting the pension tier
/// and the unemployment insurance option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedRates {
    /// Income tax rate.
    pub income_tax: Decimal,
    /// Social tax rate.
    pub social_tax: Decimal,
    /// Pension contribution rate of the selected tier.
    pub pension: Decimal,
    /// Employee unemployment rate, zero when unemployment is excluded.
    pub unemployment_employee: Decimal,
    /// Employer unemployment rate, zero when unemployment is excluded.
    pub unemployment_employer: Decimal,
}

impl AppliedRates {
    /// Selects the applicable rates from the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::calculation::AppliedRates;
    /// use salary_engine::config::TaxRateTable;
    /// use salary_engine::models::PensionRate;
    /// use rust_decimal::Decimal;
    ///
    /// let table = TaxRateTable::estonian();
    /// let rates = AppliedRates::select(&table, PensionRate::Two, false).unwrap();
    /// assert_eq!(rates.unemployment_employee, Decimal::ZERO);
    /// ```
    pub fn select(
        table: &TaxRateTable,
        pension: PensionRate,
        include_unemployment: bool,
    ) -> EngineResult<Self> {
        let (unemployment_employee, unemployment_employer) = if include_unemployment {
            (table.unemployment_employee, table.unemployment_employer)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Ok(Self {
            income_tax: table.income_tax,
            social_tax: table.social_tax,
            pension: table.pension_rate(pension)?,
            unemployment_employee,
            unemployment_employer,
        })
    }
}

/// Every figure derived from one gross salary, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBreakdown {
    /// The gross salary the breakdown was evaluated at.
    pub gross: Decimal,
    /// Second pillar pension contribution.
    pub pension_contribution: Decimal,
    /// Employee unemployment insurance.
    pub unemployment_employee: Decimal,
    /// Gross minus pension and employee unemployment.
    pub income_tax_base: Decimal,
    /// Income tax on the income tax base.
    pub income_tax: Decimal,
    /// Take-home salary.
    pub net: Decimal,
    /// Employer social tax.
    pub social_tax: Decimal,
    /// Employer unemployment insurance.
    pub unemployment_employer: Decimal,
    /// Gross plus employer contributions.
    pub employer_cost: Decimal,
}

/// Evaluates every forward formula at `gross`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{AppliedRates, breakdown};
/// use salary_engine::config::TaxRateTable;
/// use salary_engine::models::PensionRate;
/// use rust_decimal_macros::dec;
///
/// let rates = AppliedRates::select(&TaxRateTable::estonian(), PensionRate::Two, true).unwrap();
/// let b = breakdown(dec!(1000), &rates);
/// assert_eq!(b.income_tax_base, dec!(964));
/// assert_eq!(b.net, dec!(751.92));
/// assert_eq!(b.employer_cost, dec!(1338));
/// ```
pub fn breakdown(gross: Decimal, rates: &AppliedRates) -> TaxBreakdown {
    let pension_contribution = gross * rates.pension;
    let unemployment_employee = gross * rates.unemployment_employee;
    let income_tax_base = gross * (Decimal::ONE - rates.pension - rates.unemployment_employee);
    let income_tax = income_tax_base * rates.income_tax;
    let net = gross - pension_contribution - unemployment_employee - income_tax;

    let social_tax = gross * rates.social_tax;
    let unemployment_employer = gross * rates.unemployment_employer;
    let employer_cost = gross + social_tax + unemployment_employer;

    TaxBreakdown {
        gross,
        pension_contribution,
        unemployment_employee,
        income_tax_base,
        income_tax,
        net,
        social_tax,
        unemployment_employer,
        employer_cost,
    }
}

/// Net salary for a gross salary.
pub fn net_from_gross(gross: Decimal, rates: &AppliedRates) -> Decimal {
    let pension_contribution = gross * rates.pension;
    let unemployment_contribution = gross * rates.unemployment_employee;
    let income_tax_base = gross - pension_contribution - unemployment_contribution;
    let income_tax = income_tax_base * rates.income_tax;

    gross - pension_contribution - unemployment_contribution - income_tax
}

/// Employer cost for a gross salary.
pub fn employer_cost_from_gross(gross: Decimal, rates: &AppliedRates) -> Decimal {
    let social_tax = gross * rates.social_tax;
    let employer_unemployment = gross * rates.unemployment_employer;

    gross + social_tax + employer_unemployment
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn rates(pension: PensionRate, include_unemployment: bool) -> AppliedRates {
        AppliedRates::select(&TaxRateTable::estonian(), pension, include_unemployment).unwrap()
    }

    fn pension_strategy() -> impl Strategy<Value = PensionRate> {
        prop::sample::select(PensionRate::ALL.to_vec())
    }

    /// Gross 1000 with the 2% tier and unemployment insurance.
    #[test]
    fn test_reference_breakdown_for_1000_gross() {
        let b = breakdown(dec!(1000), &rates(PensionRate::Two, true));

        assert_eq!(b.pension_contribution, dec!(20.00));
        assert_eq!(b.unemployment_employee, dec!(16.00));
        assert_eq!(b.income_tax_base, dec!(964.00));
        assert_eq!(b.income_tax, dec!(212.08));
        assert_eq!(b.net, dec!(751.92));
        assert_eq!(b.social_tax, dec!(330.00));
        assert_eq!(b.unemployment_employer, dec!(8.00));
        assert_eq!(b.employer_cost, dec!(1338.00));
    }

    #[test]
    fn test_no_pension_no_unemployment_zeroes_contributions() {
        let b = breakdown(dec!(2500), &rates(PensionRate::NotJoined, false));

        assert_eq!(b.pension_contribution, Decimal::ZERO);
        assert_eq!(b.unemployment_employee, Decimal::ZERO);
        assert_eq!(b.unemployment_employer, Decimal::ZERO);
        assert_eq!(b.income_tax, dec!(550));
        assert_eq!(b.net, dec!(1950));
        assert_eq!(b.employer_cost, dec!(3325));
    }

    #[test]
    fn test_select_excludes_unemployment_when_disabled() {
        let applied = rates(PensionRate::Six, false);
        assert_eq!(applied.pension, dec!(0.06));
        assert_eq!(applied.unemployment_employee, Decimal::ZERO);
        assert_eq!(applied.unemployment_employer, Decimal::ZERO);
    }

    #[test]
    fn test_shortcut_formulas_match_breakdown() {
        let applied = rates(PensionRate::Four, true);
        let b = breakdown(dec!(1873.45), &applied);
        assert_eq!(net_from_gross(dec!(1873.45), &applied), b.net);
        assert_eq!(employer_cost_from_gross(dec!(1873.45), &applied), b.employer_cost);
    }

    proptest! {
        #[test]
        fn prop_forward_formulas_are_strictly_increasing(
            low_cents in 1u64..100_000_000,
            step_cents in 1u64..1_000_000,
            pension in pension_strategy(),
            include_unemployment in any::<bool>(),
        ) {
            let applied = rates(pension, include_unemployment);
            let g1 = Decimal::new(low_cents as i64, 2);
            let g2 = Decimal::new((low_cents + step_cents) as i64, 2);

            prop_assert!(net_from_gross(g1, &applied) < net_from_gross(g2, &applied));
            prop_assert!(
                employer_cost_from_gross(g1, &applied) < employer_cost_from_gross(g2, &applied)
            );
        }

        #[test]
        fn prop_net_below_gross_below_employer_cost(
            cents in 1u64..100_000_000,
            pension in pension_strategy(),
            include_unemployment in any::<bool>(),
        ) {
            let b = breakdown(Decimal::new(cents as i64, 2), &rates(pension, include_unemployment));
            prop_assert!(b.net <= b.gross);
            prop_assert!(b.gross <= b.employer_cost);
        }
    }
}

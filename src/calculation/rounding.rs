//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by every reported amount.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to cents using round-half-away-from-zero.
///
/// The result always carries exactly two fractional digits, so `1000`
/// becomes `1000.00` when displayed or serialized.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(212.085)).to_string(), "212.09");
/// assert_eq!(round_money(dec!(1000)).to_string(), "1000.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

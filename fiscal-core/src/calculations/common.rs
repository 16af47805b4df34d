//! Rounding helpers.
//!
//! Calculations carry full precision; these are applied only when a figure
//! is shown to a user, never to a value that feeds another calculation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1014.534)), dec!(1014.53));
/// assert_eq!(round_half_up(dec!(1014.535)), dec!(1014.54));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the nearest whole euro, halves away from zero.
///
/// French tax notices state amounts in whole euros.
///
/// ```
/// use rust_decimal_macros::dec;
/// use fiscal_core::calculations::common::round_to_euro;
///
/// assert_eq!(round_to_euro(dec!(1014.53)), dec!(1015));
/// assert_eq!(round_to_euro(dec!(1014.49)), dec!(1014));
/// assert_eq!(round_to_euro(dec!(2.5)), dec!(3));
/// ```
pub fn round_to_euro(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// `true` when `value` lies in `[0, 1]`.
pub fn is_unit_rate(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    #[test]
    fn round_to_euro_rounds_half_up() {
        assert_eq!(round_to_euro(dec!(0.5)), dec!(1));
        assert_eq!(round_to_euro(dec!(0.49)), dec!(0));
    }

    #[test]
    fn round_to_euro_rounds_negative_away_from_zero() {
        assert_eq!(round_to_euro(dec!(-10.5)), dec!(-11));
    }

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        assert_eq!(max(dec!(-50.00), dec!(50.00)), dec!(50.00));
    }

    #[test]
    fn is_unit_rate_bounds_are_inclusive() {
        assert!(is_unit_rate(dec!(0)));
        assert!(is_unit_rate(dec!(1)));
        assert!(is_unit_rate(dec!(0.3)));
        assert!(!is_unit_rate(dec!(-0.01)));
        assert!(!is_unit_rate(dec!(1.01)));
    }
}

//! Precision rule for cost-basis arithmetic.
//!
//! Quote-denominated values (prices, notional) are usually above one and keep
//! two decimal places; fractional base-asset quantities keep eight. Every
//! operation in this module rounds its result with that rule, so a chain of
//! operations never carries more precision than the exchange itself would.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for values strictly greater than one.
pub const PRECISION_ABOVE_ONE: u32 = 2;

/// Decimal places kept for values less than or equal to one.
pub const PRECISION_UP_TO_ONE: u32 = 8;

/// Round `value` to 2 dp when it is `> 1`, otherwise to 8 dp.
///
/// Midpoints round to the nearest even digit. The result always carries
/// exactly that many places, so the branch taken shows in its scale.
pub fn round_value(value: Decimal) -> Decimal {
    let dp = if value > Decimal::ONE {
        PRECISION_ABOVE_ONE
    } else {
        PRECISION_UP_TO_ONE
    };
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(dp);
    rounded
}

pub fn add(a: Decimal, b: Decimal) -> Decimal {
    round_value(a + b)
}

pub fn sub(a: Decimal, b: Decimal) -> Decimal {
    round_value(a - b)
}

pub fn mul(a: Decimal, b: Decimal) -> Decimal {
    round_value(a * b)
}

/// Rounded division. `None` when `b` is zero.
pub fn div(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_div(b).map(round_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_value_above_one_keeps_two_places() {
        assert_eq!(round_value(dec!(1.000001)), dec!(1.00));
        assert_eq!(round_value(dec!(1.000001)).scale(), 2);
        assert_eq!(round_value(dec!(27123.456)), dec!(27123.46));
        assert_eq!(round_value(dec!(27000)).scale(), 2);
    }

    #[test]
    fn test_round_value_one_is_in_the_fine_branch() {
        let rounded = round_value(dec!(1.0));
        assert_eq!(rounded, Decimal::ONE);
        assert_eq!(rounded.scale(), 8);
        assert_eq!(rounded.to_string(), "1.00000000");
        // 0.999999999 rounds up to one at 8 places, not to 1.00 at 2 places
        assert_eq!(round_value(dec!(0.999999999)).scale(), 8);
    }

    #[test]
    fn test_round_value_small_keeps_eight_places() {
        assert_eq!(round_value(dec!(0.123456789)), dec!(0.12345679));
        assert_eq!(round_value(dec!(-3.123456789)), dec!(-3.12345679));
    }

    #[test]
    fn test_round_value_midpoint_to_even() {
        assert_eq!(round_value(dec!(2.125)), dec!(2.12));
        assert_eq!(round_value(dec!(2.135)), dec!(2.14));
    }

    #[test]
    fn test_ops_round_results() {
        assert_eq!(add(dec!(0.5), dec!(0.75)), dec!(1.25));
        assert_eq!(sub(dec!(10.005), dec!(0.001)), dec!(10.00));
        assert_eq!(mul(dec!(30000.12), dec!(0.001)), dec!(30.00));
        assert_eq!(div(dec!(10), dec!(3)), Some(dec!(3.33)));
        assert_eq!(div(dec!(1), dec!(3)), Some(dec!(0.33333333)));
    }

    #[test]
    fn test_div_by_zero_is_none() {
        assert_eq!(div(dec!(1), Decimal::ZERO), None);
    }
}

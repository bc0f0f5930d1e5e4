//! Common utility functions for tax calculations.
//!
//! This module provides the rounding rules and small arithmetic helpers
//! shared by every rule module.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Used for cent-level amounts shown in breakdown rows.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to the nearest whole euro, half-up.
///
/// Every liability reported at the top level of a result goes through this.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::calculations::common::round_euro;
///
/// assert_eq!(round_euro(dec!(6912.675)), dec!(6913));
/// assert_eq!(round_euro(dec!(6912.49)), dec!(6912));
/// assert_eq!(round_euro(dec!(0.5)), dec!(1));
/// ```
pub fn round_euro(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a number of parts to the nearest quarter.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::calculations::common::round_quarter;
///
/// assert_eq!(round_quarter(dec!(2.5)), dec!(2.5));
/// assert_eq!(round_quarter(dec!(2.13)), dec!(2.25));
/// assert_eq!(round_quarter(dec!(2.12)), dec!(2));
/// ```
pub fn round_quarter(value: Decimal) -> Decimal {
    let quarters = (value * Decimal::from(4))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (quarters / Decimal::from(4)).normalize()
}

/// Applies a percentage (0-100) to an amount.
pub fn percent_of(
    amount: Decimal,
    rate_percent: Decimal,
) -> Decimal {
    amount * rate_percent / Decimal::ONE_HUNDRED
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative amounts to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

//! Décote: rebate on small income-tax amounts.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, percent_of};
use crate::models::DecoteConfig;

/// Computes the décote for a household whose gross tax is `ir_brut`.
///
/// The rebate is `amount - rate * ir_brut`, applies only while `ir_brut`
/// does not exceed the trigger, and never exceeds `ir_brut` itself.
/// Missing or non-positive trigger or amount disables it.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::DecoteConfig;
/// use ir_core::calculations::compute_decote;
///
/// let config = DecoteConfig {
///     trigger_single: dec!(1800),
///     amount_single: dec!(900),
///     rate_percent: dec!(45),
///     ..DecoteConfig::default()
/// };
///
/// assert_eq!(compute_decote(false, &config, dec!(1000)), dec!(450));
/// ```
pub fn compute_decote(
    is_couple: bool,
    config: &DecoteConfig,
    ir_brut: Decimal,
) -> Decimal {
    let (trigger, amount) = if is_couple {
        (config.trigger_couple, config.amount_couple)
    } else {
        (config.trigger_single, config.amount_single)
    };

    if trigger <= Decimal::ZERO || amount <= Decimal::ZERO || ir_brut <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if ir_brut > trigger {
        return Decimal::ZERO;
    }

    let decote = non_negative(amount - percent_of(ir_brut, config.rate_percent));
    decote.min(ir_brut)
}

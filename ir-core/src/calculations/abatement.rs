//! The 10% flat abatement on salaries and pensions.

use rust_decimal::Decimal;

use crate::models::Abatement10Config;

const ABATEMENT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Computes the 10% abatement on `base`, bounded by the configured floor and
/// ceiling.
///
/// A floor or ceiling of zero is treated as absent. The floor may exceed
/// `base`; callers clamp the resulting net income at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::Abatement10Config;
/// use ir_core::calculations::compute_abattement_10;
///
/// let config = Abatement10Config { plafond: dec!(14426), plancher: dec!(495) };
///
/// assert_eq!(compute_abattement_10(dec!(50000), &config), dec!(5000));
/// assert_eq!(compute_abattement_10(dec!(200000), &config), dec!(14426));
/// assert_eq!(compute_abattement_10(dec!(3000), &config), dec!(495));
/// ```
pub fn compute_abattement_10(
    base: Decimal,
    config: &Abatement10Config,
) -> Decimal {
    if base <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut abatement = base * ABATEMENT_RATE;
    if config.plancher > Decimal::ZERO {
        abatement = abatement.max(config.plancher);
    }
    if config.plafond > Decimal::ZERO {
        abatement = abatement.min(config.plafond);
    }
    abatement
}

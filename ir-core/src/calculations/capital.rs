//! Routing of capital income between the progressive scale and the flat tax.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::percent_of;
use crate::models::{CapitalIncome, CapitalMode, PfuConfig};

/// Share of capital income added to the progressive base in barème mode.
///
/// Stands in for the statutory treatment of dividends (40% abatement) and
/// the partial deductibility of CSG. The ratio is applied to the whole
/// capital total regardless of its composition.
pub const BAREME_INCLUSION_RATIO: Decimal = Decimal::from_parts(60, 0, 0, false, 2);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalSplit {
    /// Capital income before any inclusion ratio.
    pub total: Decimal,

    /// Amount added to the progressive-scale base.
    pub bareme_base: Decimal,

    /// Amount taxed at the flat rate.
    pub pfu_base: Decimal,

    /// Flat income tax on `pfu_base`, unrounded.
    pub pfu_ir: Decimal,
}

/// Routes the whole capital total through one mode.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::{CapitalIncome, CapitalMode, PfuConfig};
/// use ir_core::calculations::split_capital;
///
/// let capital = CapitalIncome { with_ps: dec!(8000), without_ps: dec!(2000) };
///
/// let pfu = split_capital(&capital, CapitalMode::Pfu, &PfuConfig::default());
/// assert_eq!(pfu.pfu_ir, dec!(1280));
/// assert_eq!(pfu.bareme_base, dec!(0));
///
/// let bareme = split_capital(&capital, CapitalMode::Bareme, &PfuConfig::default());
/// assert_eq!(bareme.bareme_base, dec!(6000));
/// assert_eq!(bareme.pfu_ir, dec!(0));
/// ```
pub fn split_capital(
    capital: &CapitalIncome,
    mode: CapitalMode,
    config: &PfuConfig,
) -> CapitalSplit {
    let total = capital.total();
    if total <= Decimal::ZERO {
        return CapitalSplit::default();
    }

    match mode {
        CapitalMode::Bareme => CapitalSplit {
            total,
            bareme_base: total * BAREME_INCLUSION_RATIO,
            pfu_base: Decimal::ZERO,
            pfu_ir: Decimal::ZERO,
        },
        CapitalMode::Pfu => CapitalSplit {
            total,
            bareme_base: Decimal::ZERO,
            pfu_base: total,
            pfu_ir: percent_of(total, config.effective_rate_ir()),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn capital() -> CapitalIncome {
        CapitalIncome {
            with_ps: dec!(5000),
            without_ps: dec!(1000),
        }
    }

    #[test]
    fn bareme_includes_sixty_percent_of_total() {
        let split = split_capital(&capital(), CapitalMode::Bareme, &PfuConfig::default());

        assert_eq!(split.total, dec!(6000));
        assert_eq!(split.bareme_base, dec!(3600));
        assert_eq!(split.pfu_base, Decimal::ZERO);
    }

    #[test]
    fn pfu_taxes_total_outside_scale() {
        let split = split_capital(&capital(), CapitalMode::Pfu, &PfuConfig::default());

        assert_eq!(split.pfu_base, dec!(6000));
        assert_eq!(split.pfu_ir, dec!(768));
        assert_eq!(split.bareme_base, Decimal::ZERO);
    }

    #[test]
    fn pfu_uses_configured_rate() {
        let config = PfuConfig {
            rate_ir: dec!(12),
            ..PfuConfig::default()
        };
        let split = split_capital(&capital(), CapitalMode::Pfu, &config);

        assert_eq!(split.pfu_ir, dec!(720));
    }

    #[test]
    fn pfu_falls_back_to_default_rate() {
        let config = PfuConfig {
            rate_ir: Decimal::ZERO,
            ..PfuConfig::default()
        };
        let split = split_capital(&capital(), CapitalMode::Pfu, &config);

        assert_eq!(split.pfu_ir, dec!(768));
    }

    #[test]
    fn no_capital_gives_empty_split() {
        let split = split_capital(&CapitalIncome::default(), CapitalMode::Pfu, &PfuConfig::default());

        assert_eq!(split, CapitalSplit::default());
    }
}

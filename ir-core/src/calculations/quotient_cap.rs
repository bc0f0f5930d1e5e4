//! Plafonnement du quotient familial.
//!
//! The parts a household holds beyond its base (1 for a single person, 2 for
//! a couple) lower its tax. That advantage is capped: the tax is recomputed
//! at base parts, and the difference with the actual tax may not exceed a
//! ceiling proportional to the extra half-parts.
//!
//! | Case                                   | Ceiling                                        |
//! |----------------------------------------|------------------------------------------------|
//! | General                                | `extra_parts * 2 * plafond_part_sup`           |
//! | Isolated single parent, parts <= 2     | `(parts - 1) * plafond_parent_iso`             |
//! | Isolated single parent, parts > 2      | `plafond_parent_iso + (parts - 2) * 2 * plafond_part_sup` |
//!
//! The isolated-parent ceiling is used only when
//! `plafond_parent_iso_deux_premieres_parts` is configured.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, round_euro};
use crate::calculations::progressive::ProgressiveScale;
use crate::models::{Household, QuotientCapConfig, TaxBracket};

/// Household tax before and after capping the quotient-familial advantage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotientCapOutcome {
    /// Tax with the advantage capped.
    pub ir: Decimal,

    /// Tax the household would pay with base parts only.
    pub ir_base: Decimal,

    /// Uncapped advantage, `ir_base - ir_after_qf`, floored at zero.
    pub avantage_brut: Decimal,

    /// Ceiling on the advantage.
    pub max_avantage: Decimal,

    /// Advantage actually granted.
    pub advantage: Decimal,

    pub is_capped: bool,
}

impl QuotientCapOutcome {
    fn unchanged(ir_after_qf: Decimal) -> Self {
        Self {
            ir: ir_after_qf,
            ir_base: ir_after_qf,
            avantage_brut: Decimal::ZERO,
            max_avantage: Decimal::ZERO,
            advantage: Decimal::ZERO,
            is_capped: false,
        }
    }
}

/// Household tax at a given number of parts: tax on income per part,
/// multiplied back by the parts and rounded to the euro.
pub fn household_tax(
    scale: &[TaxBracket],
    taxable_income: Decimal,
    parts: Decimal,
) -> Decimal {
    if parts <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let per_part = ProgressiveScale::new(scale).compute(taxable_income / parts);
    round_euro(per_part.tax * parts)
}

/// Caps the advantage granted by parts beyond the household's base parts.
///
/// `ir_after_qf` is the tax already computed with all parts. When the
/// household has no extra parts, or no ceiling is configured, it is returned
/// unchanged.
pub fn apply_quotient_cap(
    scale: &[TaxBracket],
    config: &QuotientCapConfig,
    household: &Household,
    taxable_income: Decimal,
    parts: Decimal,
    ir_after_qf: Decimal,
) -> QuotientCapOutcome {
    let base_parts = household.base_parts();
    let extra_parts = parts - base_parts;
    if extra_parts <= Decimal::ZERO {
        return QuotientCapOutcome::unchanged(ir_after_qf);
    }

    let max_avantage = max_advantage(config, household, parts, extra_parts);
    if max_avantage <= Decimal::ZERO {
        return QuotientCapOutcome::unchanged(ir_after_qf);
    }

    let ir_base = household_tax(scale, taxable_income, base_parts);
    let avantage_brut = non_negative(ir_base - ir_after_qf);
    let advantage = avantage_brut.min(max_avantage);

    QuotientCapOutcome {
        ir: non_negative(ir_base - advantage),
        ir_base,
        avantage_brut,
        max_avantage,
        advantage,
        is_capped: avantage_brut > max_avantage,
    }
}

fn max_advantage(
    config: &QuotientCapConfig,
    household: &Household,
    parts: Decimal,
    extra_parts: Decimal,
) -> Decimal {
    let per_half_part = config.plafond_part_sup;
    let parent_iso = config.plafond_parent_iso_deux_premieres_parts;

    if household.is_isolated_single() && parent_iso > Decimal::ZERO {
        if parts <= Decimal::TWO {
            (parts - Decimal::ONE) * parent_iso
        } else {
            parent_iso + (parts - Decimal::TWO) * Decimal::TWO * per_half_part
        }
    } else {
        extra_parts * Decimal::TWO * per_half_part
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{HouseholdStatus, Location};

    fn scale_2025() -> Vec<TaxBracket> {
        vec![
            TaxBracket {
                from: dec!(0),
                to: Some(dec!(11497)),
                rate_percent: dec!(0),
            },
            TaxBracket {
                from: dec!(11498),
                to: Some(dec!(29315)),
                rate_percent: dec!(11),
            },
            TaxBracket {
                from: dec!(29316),
                to: Some(dec!(83823)),
                rate_percent: dec!(30),
            },
            TaxBracket {
                from: dec!(83824),
                to: Some(dec!(180294)),
                rate_percent: dec!(41),
            },
            TaxBracket {
                from: dec!(180295),
                to: None,
                rate_percent: dec!(45),
            },
        ]
    }

    fn config() -> QuotientCapConfig {
        QuotientCapConfig {
            plafond_part_sup: dec!(1791),
            plafond_parent_iso_deux_premieres_parts: dec!(4224),
        }
    }

    fn couple() -> Household {
        Household {
            status: HouseholdStatus::Couple,
            ..Household::default()
        }
    }

    fn isolated() -> Household {
        Household {
            status: HouseholdStatus::Single,
            is_isolated: true,
            location: Location::Metropole,
        }
    }

    fn run(
        household: &Household,
        config: &QuotientCapConfig,
        taxable_income: Decimal,
        parts: Decimal,
    ) -> QuotientCapOutcome {
        let scale = scale_2025();
        let ir_after_qf = household_tax(&scale, taxable_income, parts);
        apply_quotient_cap(&scale, config, household, taxable_income, parts, ir_after_qf)
    }

    // =========================================================================
    // household_tax tests
    // =========================================================================

    #[test]
    fn household_tax_multiplies_back_and_rounds() {
        let scale = scale_2025();

        // Per part 40 000: 17 817 * 11% + 10 684 * 30% = 1 959.87 + 3 205.20
        assert_eq!(household_tax(&scale, dec!(80000), dec!(2)), dec!(10330));
    }

    #[test]
    fn household_tax_zero_parts_is_zero() {
        assert_eq!(household_tax(&scale_2025(), dec!(80000), Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // apply_quotient_cap tests
    // =========================================================================

    #[test]
    fn no_extra_parts_passes_through() {
        let outcome = run(&couple(), &config(), dec!(80000), dec!(2));

        assert_eq!(outcome.ir, dec!(10330));
        assert!(!outcome.is_capped);
        assert_eq!(outcome.advantage, Decimal::ZERO);
    }

    #[test]
    fn missing_ceiling_passes_through() {
        let outcome = run(&couple(), &QuotientCapConfig::default(), dec!(200000), dec!(3));
        let uncapped = household_tax(&scale_2025(), dec!(200000), dec!(3));

        assert_eq!(outcome.ir, uncapped);
        assert!(!outcome.is_capped);
    }

    #[test]
    fn modest_income_is_not_capped() {
        let outcome = run(&couple(), &config(), dec!(50000), dec!(2.5));

        assert!(!outcome.is_capped);
        assert_eq!(outcome.advantage, outcome.avantage_brut);
        assert_eq!(outcome.ir, household_tax(&scale_2025(), dec!(50000), dec!(2.5)));
    }

    #[test]
    fn high_income_is_capped_per_half_part() {
        let outcome = run(&couple(), &config(), dec!(200000), dec!(3));

        // Two extra half-parts
        assert_eq!(outcome.max_avantage, dec!(3582));
        assert!(outcome.is_capped);
        assert_eq!(outcome.advantage, dec!(3582));
        assert_eq!(outcome.ir, outcome.ir_base - dec!(3582));
    }

    #[test]
    fn quarter_part_gets_half_the_ceiling() {
        let outcome = run(&couple(), &config(), dec!(200000), dec!(2.25));

        assert_eq!(outcome.max_avantage, dec!(895.5));
    }

    #[test]
    fn isolated_parent_up_to_two_parts_uses_parent_ceiling() {
        let outcome = run(&isolated(), &config(), dec!(120000), dec!(2));

        assert_eq!(outcome.max_avantage, dec!(4224));
        assert!(outcome.is_capped);
        assert_eq!(outcome.ir, outcome.ir_base - dec!(4224));
    }

    #[test]
    fn isolated_parent_beyond_two_parts_adds_general_ceiling() {
        let outcome = run(&isolated(), &config(), dec!(150000), dec!(3));

        assert_eq!(outcome.max_avantage, dec!(4224) + dec!(3582));
    }

    #[test]
    fn isolated_without_parent_ceiling_uses_general_rule() {
        let general_only = QuotientCapConfig {
            plafond_part_sup: dec!(1791),
            plafond_parent_iso_deux_premieres_parts: Decimal::ZERO,
        };
        let outcome = run(&isolated(), &general_only, dec!(120000), dec!(2));

        assert_eq!(outcome.max_avantage, dec!(3582));
    }

    #[test]
    fn advantage_never_exceeds_ceiling() {
        for income in [dec!(20000), dec!(60000), dec!(110000), dec!(250000), dec!(900000)] {
            for parts in [dec!(2.25), dec!(2.5), dec!(3), dec!(4), dec!(5.5)] {
                let outcome = run(&couple(), &config(), income, parts);

                assert!(outcome.advantage <= outcome.max_avantage);
                assert_eq!(outcome.is_capped, outcome.avantage_brut > outcome.max_avantage);
            }
        }
    }
}

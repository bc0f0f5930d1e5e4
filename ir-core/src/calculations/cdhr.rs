//! Contribution différentielle sur les hauts revenus.
//!
//! Guarantees a minimum effective rate on a broad base (the assiette) above
//! a threshold, net of taxes already paid.
//!
//! # Steps
//!
//! | Term                   | Value                                                        |
//! |------------------------|--------------------------------------------------------------|
//! | `term_a_before_decote` | `min_rate * assiette`                                        |
//! | `decote_applied`       | `max(0, term_a - slope * (assiette - threshold))` in the phase-in zone, else 0 |
//! | `term_a_after_decote`  | `max(0, term_a - decote_applied)`                            |
//! | `majorations`          | `maj_couple` (couples) `+ persons_a_charge * maj_per_charge` |
//! | `term_b`               | `ir_retenu + cehr + pfu_ir + majorations`                    |
//! | `cdhr`                 | `max(0, term_a_after_decote - term_b)`                       |
//!
//! The phase-in zone runs from the threshold up to the decote maximum
//! assiette of the household type.
//!
//! The minimum rate may be configured as a fraction or as a percentage:
//! values above 1 are divided by 100. A value of exactly 1 is read as a
//! fraction (100%), which is ambiguous with 1%.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, round_euro};
use crate::models::{CdhrConfig, CdhrDetails};

/// Inputs taken from the earlier stages of the computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdhrInput {
    pub assiette: Decimal,
    pub is_couple: bool,
    pub ir_retenu: Decimal,
    pub cehr: Decimal,
    pub pfu_ir: Decimal,
    pub persons_a_charge: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdhrOutcome {
    /// Contribution due, rounded to the euro.
    pub cdhr: Decimal,

    /// Breakdown of every term. `None` when the contribution does not apply.
    pub details: Option<CdhrDetails>,
}

/// Reads the configured minimum rate as a fraction.
pub fn normalize_min_rate(raw: Decimal) -> Decimal {
    if raw > Decimal::ONE {
        raw / Decimal::ONE_HUNDRED
    } else {
        raw
    }
}

/// Computes the CDHR and its breakdown.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use ir_core::CdhrConfig;
/// use ir_core::calculations::{CdhrInput, compute_cdhr};
///
/// let config = CdhrConfig {
///     min_effective_rate: dec!(20),
///     threshold_single: dec!(250000),
///     decote_max_assiette_single: dec!(330000),
///     ..CdhrConfig::default()
/// };
/// let input = CdhrInput {
///     assiette: dec!(500000),
///     ir_retenu: dec!(80000),
///     cehr: dec!(7500),
///     ..CdhrInput::default()
/// };
///
/// let outcome = compute_cdhr(&config, &input);
/// assert_eq!(outcome.cdhr, dec!(12500));
/// ```
pub fn compute_cdhr(
    config: &CdhrConfig,
    input: &CdhrInput,
) -> CdhrOutcome {
    let min_rate = normalize_min_rate(config.min_effective_rate);
    if min_rate <= Decimal::ZERO {
        return CdhrOutcome::default();
    }

    let (threshold, decote_max_assiette) = if input.is_couple {
        (config.threshold_couple, config.decote_max_assiette_couple)
    } else {
        (config.threshold_single, config.decote_max_assiette_single)
    };
    let assiette = input.assiette;
    if assiette <= Decimal::ZERO || assiette <= threshold {
        return CdhrOutcome::default();
    }

    let slope = if config.decote_slope > Decimal::ZERO {
        config.decote_slope
    } else {
        CdhrConfig::DEFAULT_DECOTE_SLOPE
    };

    let term_a_before_decote = min_rate * assiette;
    let decote_applied = if assiette <= decote_max_assiette {
        non_negative(term_a_before_decote - slope * non_negative(assiette - threshold))
    } else {
        Decimal::ZERO
    };
    let term_a_after_decote = non_negative(term_a_before_decote - decote_applied);

    let couple_majoration = if input.is_couple {
        config.majoration_couple
    } else {
        Decimal::ZERO
    };
    let majorations =
        couple_majoration + Decimal::from(input.persons_a_charge) * config.majoration_per_charge;

    let term_b = input.ir_retenu + input.cehr + input.pfu_ir + majorations;
    let cdhr = round_euro(non_negative(term_a_after_decote - term_b));

    CdhrOutcome {
        cdhr,
        details: Some(CdhrDetails {
            assiette,
            threshold,
            min_rate,
            term_a_before_decote,
            decote_applied,
            term_a_after_decote,
            ir_retenu: input.ir_retenu,
            cehr: input.cehr,
            pfu_ir: input.pfu_ir,
            majorations,
            term_b,
            cdhr,
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> CdhrConfig {
        CdhrConfig {
            min_effective_rate: dec!(20),
            threshold_single: dec!(250000),
            threshold_couple: dec!(500000),
            decote_max_assiette_single: dec!(330000),
            decote_max_assiette_couple: dec!(660000),
            ..CdhrConfig::default()
        }
    }

    // =========================================================================
    // normalize_min_rate tests
    // =========================================================================

    #[test]
    fn percent_and_fraction_are_equivalent() {
        assert_eq!(normalize_min_rate(dec!(20)), dec!(0.2));
        assert_eq!(normalize_min_rate(dec!(0.2)), dec!(0.2));
    }

    #[test]
    fn exactly_one_is_read_as_a_fraction() {
        assert_eq!(normalize_min_rate(Decimal::ONE), Decimal::ONE);
    }

    // =========================================================================
    // compute_cdhr tests
    // =========================================================================

    #[test]
    fn zero_assiette_does_not_apply() {
        let outcome = compute_cdhr(&config(), &CdhrInput::default());

        assert_eq!(outcome.cdhr, Decimal::ZERO);
        assert_eq!(outcome.details, None);
    }

    #[test]
    fn assiette_at_threshold_does_not_apply() {
        let input = CdhrInput {
            assiette: dec!(250000),
            ..CdhrInput::default()
        };
        let outcome = compute_cdhr(&config(), &input);

        assert_eq!(outcome.cdhr, Decimal::ZERO);
        assert_eq!(outcome.details, None);
    }

    #[test]
    fn missing_rate_does_not_apply() {
        let input = CdhrInput {
            assiette: dec!(900000),
            ..CdhrInput::default()
        };
        let outcome = compute_cdhr(&CdhrConfig::default(), &input);

        assert_eq!(outcome, CdhrOutcome::default());
    }

    #[test]
    fn phase_in_decote_reduces_term_a() {
        let input = CdhrInput {
            assiette: dec!(300000),
            ir_retenu: dec!(30000),
            cehr: dec!(1500),
            ..CdhrInput::default()
        };
        let outcome = compute_cdhr(&config(), &input);
        let details = outcome.details.expect("cdhr applies");

        assert_eq!(details.term_a_before_decote, dec!(60000));
        // 60 000 - 0.825 * 50 000
        assert_eq!(details.decote_applied, dec!(18750));
        assert_eq!(details.term_a_after_decote, dec!(41250));
        assert_eq!(details.term_b, dec!(31500));
        assert_eq!(outcome.cdhr, dec!(9750));
        assert_eq!(details.cdhr, outcome.cdhr);
    }

    #[test]
    fn decote_vanishes_at_end_of_phase_in() {
        let input = CdhrInput {
            assiette: dec!(330000),
            ..CdhrInput::default()
        };
        let details = compute_cdhr(&config(), &input).details.expect("cdhr applies");

        assert_eq!(details.decote_applied, Decimal::ZERO);
        assert_eq!(details.term_a_after_decote, dec!(66000));
    }

    #[test]
    fn above_phase_in_has_no_decote() {
        let input = CdhrInput {
            assiette: dec!(500000),
            ir_retenu: dec!(80000),
            cehr: dec!(7500),
            ..CdhrInput::default()
        };
        let outcome = compute_cdhr(&config(), &input);
        let details = outcome.details.expect("cdhr applies");

        assert_eq!(details.decote_applied, Decimal::ZERO);
        assert_eq!(outcome.cdhr, dec!(12500));
    }

    #[test]
    fn couple_majorations_include_dependants() {
        let input = CdhrInput {
            assiette: dec!(1000000),
            is_couple: true,
            ir_retenu: dec!(150000),
            cehr: dec!(15000),
            pfu_ir: dec!(6400),
            persons_a_charge: 2,
        };
        let outcome = compute_cdhr(&config(), &input);
        let details = outcome.details.expect("cdhr applies");

        assert_eq!(details.majorations, dec!(15500));
        assert_eq!(details.term_b, dec!(186900));
        assert_eq!(outcome.cdhr, dec!(13100));
    }

    #[test]
    fn taxes_already_paid_above_minimum_give_zero() {
        let input = CdhrInput {
            assiette: dec!(500000),
            ir_retenu: dec!(150000),
            ..CdhrInput::default()
        };
        let outcome = compute_cdhr(&config(), &input);

        assert_eq!(outcome.cdhr, Decimal::ZERO);
        assert!(outcome.details.is_some());
    }

    #[test]
    fn never_negative() {
        for assiette in [dec!(260000), dec!(320000), dec!(400000), dec!(2000000)] {
            for ir_retenu in [dec!(0), dec!(50000), dec!(900000)] {
                let input = CdhrInput {
                    assiette,
                    ir_retenu,
                    ..CdhrInput::default()
                };

                assert!(compute_cdhr(&config(), &input).cdhr >= Decimal::ZERO);
            }
        }
    }
}

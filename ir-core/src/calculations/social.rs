//! Prélèvements sociaux on property and capital income.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, percent_of};
use crate::models::{SocialConfig, SocialContributions};

/// Levies the patrimony rate on net property income and on capital income
/// subject to social contributions. Zero without a configured rate.
pub fn compute_social_contributions(
    fonciers_base: Decimal,
    capital_with_ps: Decimal,
    config: &SocialConfig,
) -> SocialContributions {
    let rate = config.patrimony_rate;
    if rate <= Decimal::ZERO {
        return SocialContributions::default();
    }

    let foncier = percent_of(non_negative(fonciers_base), rate);
    let dividends = if capital_with_ps > Decimal::ZERO {
        percent_of(capital_with_ps, rate)
    } else {
        Decimal::ZERO
    };

    SocialContributions {
        foncier,
        dividends,
        total: foncier + dividends,
    }
}

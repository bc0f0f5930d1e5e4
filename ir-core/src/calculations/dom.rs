//! Abatement on income tax for overseas departments.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, percent_of};
use crate::models::{DomConfig, Location};

/// Computes the overseas abatement on `ir_after_qf`.
///
/// Zero in metropolitan France. In a zone, the abatement is the zone rate
/// applied to the tax, limited by the zone cap when one is set.
pub fn compute_dom_abatement(
    location: Location,
    config: &DomConfig,
    ir_after_qf: Decimal,
) -> Decimal {
    let Some(zone) = config.zone(location) else {
        return Decimal::ZERO;
    };
    if zone.rate_percent <= Decimal::ZERO || ir_after_qf <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let abatement = percent_of(ir_after_qf, zone.rate_percent);
    let capped = if zone.cap > Decimal::ZERO {
        abatement.min(zone.cap)
    } else {
        abatement
    };
    non_negative(capped)
}

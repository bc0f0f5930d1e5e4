//! Contribution exceptionnelle sur les hauts revenus.

use rust_decimal::Decimal;

use crate::calculations::progressive::{ProgressiveScale, ProgressiveTaxResult};
use crate::models::CehrConfig;

/// Runs the reference income through the CEHR scale of the household type.
///
/// An empty scale or a non-positive income yields zero.
pub fn compute_cehr(
    rfr: Decimal,
    is_couple: bool,
    config: &CehrConfig,
) -> ProgressiveTaxResult {
    ProgressiveScale::new(config.scale(is_couple).brackets()).compute(rfr)
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::household::{Dependents, Household};
use crate::models::income::{CapitalMode, IncomeSet};
use crate::models::lenient::{lenient_count, lenient_optional_decimal};
use crate::models::tax_year_settings::YearKey;

/// One income-tax computation request: who the household is and what it
/// declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrRequest {
    pub household: Household,
    pub dependents: Dependents,
    pub incomes: IncomeSet,
    pub capital_mode: CapitalMode,
    /// Dependants counted for the CDHR majorations.
    #[serde(deserialize_with = "lenient_count")]
    pub persons_a_charge_count: u32,
    pub year: YearKey,
    /// Overrides the CDHR assiette, which otherwise is the reference income.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub cdhr_assiette: Option<Decimal>,
}

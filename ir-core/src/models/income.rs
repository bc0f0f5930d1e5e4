use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::lenient::lenient_decimal;

/// Annual amounts declared by one member of the household.
///
/// Negative amounts are accepted on input and read as zero by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarantIncome {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub salaries: Decimal,
    /// Remuneration of partners and managers (article 62), taxed like salaries.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub associes62: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub pensions: Decimal,
    /// Industrial, commercial or professional profits, already net.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub bic: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fonciers: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub other: Decimal,
    /// Actual professional expenses. When positive they replace the 10%
    /// salary abatement for this declarant.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub real_expenses: Decimal,
}

impl DeclarantIncome {
    /// Salary-type income eligible for the 10% abatement.
    pub fn salary_income(&self) -> Decimal {
        self.salaries.max(Decimal::ZERO) + self.associes62.max(Decimal::ZERO)
    }
}

/// Household capital income, split by exposure to social contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapitalIncome {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub with_ps: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub without_ps: Decimal,
}

impl CapitalIncome {
    pub fn total(&self) -> Decimal {
        self.with_ps.max(Decimal::ZERO) + self.without_ps.max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSet {
    #[serde(default)]
    pub d1: DeclarantIncome,
    /// Second declarant. Only read for couples.
    #[serde(default)]
    pub d2: DeclarantIncome,
    #[serde(default)]
    pub capital: CapitalIncome,
    /// Net property income declared at household level. Adds to the
    /// per-declarant `fonciers` amounts.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fonciers_net: Decimal,
}

/// How capital income is taxed for the whole household.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalMode {
    /// Progressive scale, with the statutory inclusion ratio.
    #[default]
    Bareme,
    /// Flat tax outside the scale.
    Pfu,
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::lenient::lenient_count;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdStatus {
    #[default]
    Single,
    Couple,
}

/// Tax residence, which decides whether the overseas abatement applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[default]
    Metropole,
    /// Guadeloupe, Martinique, La Réunion.
    Gmr,
    /// Guyane, Mayotte.
    Guyane,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    #[serde(default)]
    pub status: HouseholdStatus,
    /// Single parent raising children alone (case T). Ignored for couples.
    #[serde(default)]
    pub is_isolated: bool,
    #[serde(default)]
    pub location: Location,
}

impl Household {
    pub fn is_couple(&self) -> bool {
        self.status == HouseholdStatus::Couple
    }

    pub fn is_isolated_single(&self) -> bool {
        self.status == HouseholdStatus::Single && self.is_isolated
    }

    /// Parts the household holds before any dependant is counted.
    pub fn base_parts(&self) -> Decimal {
        match self.status {
            HouseholdStatus::Single => Decimal::ONE,
            HouseholdStatus::Couple => Decimal::TWO,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyMode {
    /// Exclusive custody, the child is fully dependent on the household.
    #[default]
    Charge,
    /// Alternating custody shared with the other parent.
    Shared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    #[serde(default)]
    pub mode: CustodyMode,
}

impl Child {
    pub fn charge() -> Self {
        Self {
            mode: CustodyMode::Charge,
        }
    }

    pub fn shared() -> Self {
        Self {
            mode: CustodyMode::Shared,
        }
    }
}

/// How the household's children are described.
///
/// `Children` carries the custody mode of every child and is the precise
/// form. `Count` is the coarse fallback for callers that only know how many
/// children there are; it assumes exclusive custody for all of them. A
/// non-numeric count reads as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependents {
    Children(Vec<Child>),
    Count(#[serde(deserialize_with = "lenient_count")] u32),
}

impl Default for Dependents {
    fn default() -> Self {
        Self::Children(Vec::new())
    }
}

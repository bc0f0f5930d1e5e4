use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::income::CapitalMode;
use crate::models::tax_year_settings::YearKey;

/// One row of a bracket-by-bracket breakdown.
///
/// Consumed verbatim by audit displays; field names are part of the public
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketDetail {
    pub label: String,
    pub base: Decimal,
    /// Bracket rate in percent.
    pub rate: Decimal,
    pub tax: Decimal,
}

/// Every intermediate term of the CDHR computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CdhrDetails {
    pub assiette: Decimal,
    pub threshold: Decimal,
    /// Normalized minimum effective rate, as a fraction.
    pub min_rate: Decimal,
    pub term_a_before_decote: Decimal,
    pub decote_applied: Decimal,
    pub term_a_after_decote: Decimal,
    pub ir_retenu: Decimal,
    pub cehr: Decimal,
    pub pfu_ir: Decimal,
    pub majorations: Decimal,
    pub term_b: Decimal,
    pub cdhr: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialContributions {
    pub foncier: Decimal,
    pub dividends: Decimal,
    pub total: Decimal,
}

/// Income retained for one declarant after the salary abatement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarantBreakdown {
    pub salary_income: Decimal,
    pub salary_abatement: Decimal,
    pub used_real_expenses: bool,
    pub net_salary_income: Decimal,
    pub pensions: Decimal,
    pub other_income: Decimal,
}

/// Complete outcome of one income-tax computation.
///
/// Always fully populated: a household with nothing to declare yields zeros,
/// never a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrResult {
    pub year: YearKey,
    pub year_label: String,

    // Income and quotient familial
    pub declarants: Vec<DeclarantBreakdown>,
    pub pension_abatement: Decimal,
    pub taxable_income: Decimal,
    pub rfr: Decimal,
    pub parts: Decimal,
    pub income_per_part: Decimal,

    // Marginal bracket
    pub tmi_rate: Decimal,
    pub tmi_base_global: Decimal,
    /// Household income that can still be added while staying in the
    /// marginal bracket: `(to - income_per_part) * parts`. Bounds are
    /// inclusive euros, so the next bracket starts one euro per part
    /// beyond this margin. `None` in the top bracket.
    pub tmi_margin_global: Option<Decimal>,

    // Progressive tax
    pub ir_before_cap: Decimal,
    pub ir_base_parts: Decimal,
    pub qf_advantage: Decimal,
    pub qf_max_advantage: Decimal,
    pub qf_is_capped: bool,
    pub ir_gross: Decimal,
    pub decote: Decimal,
    pub dom_abatement: Decimal,
    pub ir_net: Decimal,
    pub brackets_details: Vec<BracketDetail>,

    // Capital income
    pub capital_mode: CapitalMode,
    pub capital_total: Decimal,
    pub pfu_ir: Decimal,
    /// Flat-tax rates in percent, income-tax share then social share.
    pub pfu_rate_ir: Decimal,
    pub pfu_rate_ps: Decimal,

    // Surtaxes
    pub cehr: Decimal,
    pub cehr_details: Vec<BracketDetail>,
    pub cdhr: Decimal,
    pub cdhr_details: Option<CdhrDetails>,

    pub ps: SocialContributions,
    pub total_tax: Decimal,
}

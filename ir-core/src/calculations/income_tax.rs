//! Income-tax computation for one household and one tax year.
//!
//! # Stages
//!
//! The order is fixed: later stages consume the results of earlier ones.
//!
//! | Stage | Description |
//! |-------|-------------|
//! | 1     | 10% abatements (salaries per declarant, pensions per household) |
//! | 2     | Capital routing: barème inclusion or flat tax |
//! | 3     | Taxable income and reference income (RFR) |
//! | 4     | Parts (quotient familial) |
//! | 5     | Progressive tax on income per part, multiplied back by parts |
//! | 6     | Quotient-familial capping |
//! | 7     | Décote |
//! | 8     | Overseas abatement |
//! | 9     | CEHR on the RFR |
//! | 10    | CDHR, netted against IR, CEHR and flat tax |
//! | 11    | Social contributions on property and capital income |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ir_core::calculations::IncomeTaxCalculator;
//! use ir_core::{
//!     Child, Dependents, Household, HouseholdStatus, IncomeSet, IrRequest, TaxBracket,
//!     TaxScale, TaxYearSettings, YearRules,
//! };
//!
//! let settings = TaxYearSettings {
//!     current: YearRules {
//!         scale: TaxScale::new(vec![
//!             TaxBracket { from: dec!(0), to: Some(dec!(11497)), rate_percent: dec!(0) },
//!             TaxBracket { from: dec!(11498), to: Some(dec!(29315)), rate_percent: dec!(11) },
//!             TaxBracket { from: dec!(29316), to: Some(dec!(78570)), rate_percent: dec!(30) },
//!             TaxBracket { from: dec!(78571), to: None, rate_percent: dec!(41) },
//!         ]),
//!         ..YearRules::default()
//!     },
//!     ..TaxYearSettings::default()
//! };
//!
//! let mut incomes = IncomeSet::default();
//! incomes.d1.other = dec!(80000);
//!
//! let request = IrRequest {
//!     household: Household { status: HouseholdStatus::Couple, ..Household::default() },
//!     dependents: Dependents::Children(vec![Child::charge()]),
//!     incomes,
//!     ..IrRequest::default()
//! };
//!
//! let result = IncomeTaxCalculator::new(&settings).calculate(&request);
//!
//! assert_eq!(result.parts, dec!(2.5));
//! assert_eq!(result.income_per_part, dec!(32000));
//! assert_eq!(result.ir_net, dec!(6913));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::abatement::compute_abattement_10;
use crate::calculations::capital::split_capital;
use crate::calculations::cdhr::{CdhrInput, compute_cdhr};
use crate::calculations::cehr::compute_cehr;
use crate::calculations::common::{non_negative, round_euro, round_half_up};
use crate::calculations::decote::compute_decote;
use crate::calculations::dom::compute_dom_abatement;
use crate::calculations::parts::{PartsCalculator, PartsFromChildren, PartsFromCount};
use crate::calculations::progressive::ProgressiveScale;
use crate::calculations::quotient_cap::apply_quotient_cap;
use crate::calculations::social::compute_social_contributions;
use crate::models::{
    Abatement10Config, CapitalIncome, DeclarantBreakdown, DeclarantIncome, Dependents, IrRequest,
    IrResult, SocialContributions, TaxYearSettings, YearKey,
};

/// The same request evaluated against both yearly rule sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearComparison {
    pub current: IrResult,
    pub previous: IrResult,
}

/// Calculator for the complete income-tax liability of a household.
///
/// Holds a borrowed, read-only view of the settings, so one settings value
/// can serve any number of computations, including from several threads.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    settings: &'a TaxYearSettings,
}

impl<'a> IncomeTaxCalculator<'a> {
    pub fn new(settings: &'a TaxYearSettings) -> Self {
        Self { settings }
    }

    /// Runs every stage for `request` and returns the full result.
    ///
    /// Never fails: missing settings disable the rule they configure, and
    /// an empty scale yields zero tax.
    pub fn calculate(
        &self,
        request: &IrRequest,
    ) -> IrResult {
        let rules = self.settings.rules_for(request.year);
        let household = &request.household;
        let is_couple = household.is_couple();
        let scale = rules.scale.brackets();
        if scale.is_empty() {
            warn!(year = ?request.year, "income tax scale is empty, progressive tax will be zero");
        }

        // Abatements
        let declarants = self.declarants(request, &rules.abat10.salaries);
        let pensions: Decimal = declarants.iter().map(|d| d.pensions).sum();
        let pension_abatement =
            compute_abattement_10(pensions, &rules.abat10.pensions).min(pensions);
        let fonciers = self.fonciers_base(request);

        // Capital routing
        let capital = split_capital(
            &request.incomes.capital,
            request.capital_mode,
            &self.settings.pfu,
        );

        // Taxable income
        let declared: Decimal = declarants
            .iter()
            .map(|d| d.net_salary_income + d.pensions + d.other_income)
            .sum();
        let ordinary_income = non_negative(declared - pension_abatement + fonciers);
        let taxable_income = round_euro(ordinary_income + capital.bareme_base);
        let rfr = round_euro(ordinary_income + capital.total);
        debug!(%taxable_income, %rfr, %pension_abatement, capital_mode = ?request.capital_mode, "taxable income");

        // Parts and progressive tax
        let parts = self.parts(request);
        let income_per_part = taxable_income / parts;
        let progressive = ProgressiveScale::new(scale).compute(income_per_part);
        let ir_before_cap = round_euro(progressive.tax * parts);
        debug!(%parts, %income_per_part, %ir_before_cap, tmi = %progressive.tmi_rate, "progressive tax");

        // Quotient-familial capping
        let cap = apply_quotient_cap(
            scale,
            &rules.quotient_cap,
            household,
            taxable_income,
            parts,
            ir_before_cap,
        );
        let ir_gross = cap.ir;
        debug!(ir_base = %cap.ir_base, advantage = %cap.advantage, capped = cap.is_capped, "quotient familial");

        // Décote and overseas abatement
        let decote = round_euro(compute_decote(is_couple, &rules.decote, ir_gross));
        let dom_abatement = round_euro(compute_dom_abatement(
            household.location,
            &rules.dom,
            ir_gross,
        ));
        let ir_net = non_negative(ir_gross - decote - dom_abatement);
        debug!(%ir_gross, %decote, %dom_abatement, %ir_net, "net income tax");

        // Surtaxes
        let pfu_ir = round_euro(capital.pfu_ir);
        let cehr_result = compute_cehr(rfr, is_couple, &self.settings.cehr);
        let cehr = round_euro(cehr_result.tax);
        let cdhr = compute_cdhr(
            &self.settings.cdhr,
            &CdhrInput {
                assiette: request.cdhr_assiette.map_or(rfr, non_negative),
                is_couple,
                ir_retenu: ir_net,
                cehr,
                pfu_ir,
                persons_a_charge: request.persons_a_charge_count,
            },
        );
        debug!(%pfu_ir, %cehr, cdhr = %cdhr.cdhr, "surtaxes");

        // Social contributions
        let ps = self.social_contributions(fonciers, &request.incomes.capital);

        let total_tax = ir_net + pfu_ir + cehr + cdhr.cdhr + ps.total;
        debug!(%total_tax, "income tax computed");

        IrResult {
            year: request.year,
            year_label: rules.label.clone(),
            declarants,
            pension_abatement,
            taxable_income,
            rfr,
            parts,
            income_per_part: round_half_up(income_per_part),
            tmi_rate: progressive.tmi_rate,
            tmi_base_global: round_euro(progressive.tmi_base * parts),
            tmi_margin_global: progressive
                .tmi_upper
                .map(|to| round_euro(non_negative(to - income_per_part) * parts)),
            ir_before_cap,
            ir_base_parts: cap.ir_base,
            qf_advantage: cap.advantage,
            qf_max_advantage: cap.max_avantage,
            qf_is_capped: cap.is_capped,
            ir_gross,
            decote,
            dom_abatement,
            ir_net,
            brackets_details: progressive.details,
            capital_mode: request.capital_mode,
            capital_total: capital.total,
            pfu_ir,
            pfu_rate_ir: self.settings.pfu.effective_rate_ir(),
            pfu_rate_ps: self.settings.pfu.rate_ps,
            cehr,
            cehr_details: cehr_result.details,
            cdhr: cdhr.cdhr,
            cdhr_details: cdhr.details,
            ps,
            total_tax,
        }
    }

    /// Runs `request` against both the current and the previous year rules.
    pub fn compare_years(
        &self,
        request: &IrRequest,
    ) -> YearComparison {
        let for_year = |year: YearKey| {
            let request = IrRequest {
                year,
                ..request.clone()
            };
            self.calculate(&request)
        };

        YearComparison {
            current: for_year(YearKey::Current),
            previous: for_year(YearKey::Previous),
        }
    }

    /// Breakdown for each declarant present in the household.
    fn declarants(
        &self,
        request: &IrRequest,
        salary_config: &Abatement10Config,
    ) -> Vec<DeclarantBreakdown> {
        let incomes = &request.incomes;
        let mut present = vec![&incomes.d1];
        if request.household.is_couple() {
            present.push(&incomes.d2);
        }

        present
            .into_iter()
            .map(|income| self.declarant_breakdown(income, salary_config))
            .collect()
    }

    fn declarant_breakdown(
        &self,
        income: &DeclarantIncome,
        salary_config: &Abatement10Config,
    ) -> DeclarantBreakdown {
        let salary_income = income.salary_income();
        let used_real_expenses = income.real_expenses > Decimal::ZERO;
        let salary_abatement = if used_real_expenses {
            income.real_expenses
        } else {
            compute_abattement_10(salary_income, salary_config)
        }
        .min(salary_income);

        DeclarantBreakdown {
            salary_income,
            salary_abatement,
            used_real_expenses,
            net_salary_income: salary_income - salary_abatement,
            pensions: non_negative(income.pensions),
            other_income: non_negative(income.bic) + non_negative(income.other),
        }
    }

    /// Net property income: per-declarant amounts plus the household amount.
    fn fonciers_base(
        &self,
        request: &IrRequest,
    ) -> Decimal {
        let incomes = &request.incomes;
        let mut total = non_negative(incomes.d1.fonciers) + non_negative(incomes.fonciers_net);
        if request.household.is_couple() {
            total += non_negative(incomes.d2.fonciers);
        }
        total
    }

    fn parts(
        &self,
        request: &IrRequest,
    ) -> Decimal {
        match &request.dependents {
            Dependents::Children(children) => {
                PartsFromChildren::new(children).parts(&request.household)
            }
            Dependents::Count(count) => PartsFromCount::new(*count).parts(&request.household),
        }
    }

    fn social_contributions(
        &self,
        fonciers: Decimal,
        capital: &CapitalIncome,
    ) -> SocialContributions {
        let raw = compute_social_contributions(fonciers, capital.with_ps, &self.settings.social);
        let foncier = round_euro(raw.foncier);
        let dividends = round_euro(raw.dividends);

        SocialContributions {
            foncier,
            dividends,
            total: foncier + dividends,
        }
    }
}

/// Shorthand for `IncomeTaxCalculator::new(settings).calculate(request)`.
pub fn compute_ir(
    settings: &TaxYearSettings,
    request: &IrRequest,
) -> IrResult {
    IncomeTaxCalculator::new(settings).calculate(request)
}

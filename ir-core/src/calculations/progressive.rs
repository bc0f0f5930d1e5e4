//! Generic marginal-bracket tax engine.
//!
//! Used for the main income-tax scale (applied to income per part) and for
//! the CEHR surtax scale (applied to reference income).
//!
//! # Algorithm
//!
//! Brackets are walked in order. Each contributes
//! `max(0, min(amount, to) - from) * rate`, and the walk stops at the first
//! bracket containing `amount` (unbounded, or `amount <= to`). An amount
//! sitting exactly on an upper bound therefore saturates the lower bracket
//! and leaves the next one untouched.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use ir_core::TaxBracket;
//! use ir_core::calculations::ProgressiveScale;
//!
//! let brackets = vec![
//!     TaxBracket { from: dec!(0), to: Some(dec!(11497)), rate_percent: dec!(0) },
//!     TaxBracket { from: dec!(11498), to: Some(dec!(29315)), rate_percent: dec!(11) },
//!     TaxBracket { from: dec!(29316), to: Some(dec!(78570)), rate_percent: dec!(30) },
//!     TaxBracket { from: dec!(78571), to: None, rate_percent: dec!(41) },
//! ];
//!
//! let result = ProgressiveScale::new(&brackets).compute(dec!(32000));
//!
//! assert_eq!(result.tax, dec!(2765.07));
//! assert_eq!(result.tmi_rate, dec!(30));
//! assert_eq!(result.tmi_upper, Some(dec!(78570)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calculations::common::{non_negative, percent_of, round_half_up};
use crate::models::{BracketDetail, TaxBracket};

/// Outcome of running an amount through a progressive scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveTaxResult {
    /// Total tax, unrounded.
    pub tax: Decimal,

    /// Rate of the last bracket with a positive base.
    pub tmi_rate: Decimal,

    /// Portion of the amount taxed in the marginal bracket.
    pub tmi_base: Decimal,

    /// Upper bound of the marginal bracket, `None` for the top bracket.
    pub tmi_upper: Option<Decimal>,

    /// One row per bracket of the scale, including untouched brackets.
    pub details: Vec<BracketDetail>,
}

impl ProgressiveTaxResult {
    fn zero(brackets: &[TaxBracket]) -> Self {
        Self {
            tax: Decimal::ZERO,
            tmi_rate: Decimal::ZERO,
            tmi_base: Decimal::ZERO,
            tmi_upper: None,
            details: brackets.iter().map(empty_row).collect(),
        }
    }
}

/// A progressive scale borrowed from the settings.
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveScale<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> ProgressiveScale<'a> {
    /// Creates a calculator over `brackets`, which should be sorted by
    /// `from` with a single unbounded bracket last.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Taxes `amount` through the scale.
    ///
    /// An empty scale or a non-positive amount yields an all-zero result.
    pub fn compute(
        &self,
        amount: Decimal,
    ) -> ProgressiveTaxResult {
        if amount <= Decimal::ZERO || self.brackets.is_empty() {
            return ProgressiveTaxResult::zero(self.brackets);
        }

        let mut tax = Decimal::ZERO;
        let mut marginal: Option<&TaxBracket> = None;
        let mut marginal_base = Decimal::ZERO;
        let mut details = Vec::with_capacity(self.brackets.len());
        let mut reached = false;

        for bracket in self.brackets {
            if reached {
                details.push(empty_row(bracket));
                continue;
            }

            let upper = bracket.to.map_or(amount, |to| amount.min(to));
            let base = non_negative(upper - bracket.from);
            let bracket_tax = percent_of(base, bracket.rate_percent);
            tax += bracket_tax;

            if base > Decimal::ZERO {
                marginal = Some(bracket);
                marginal_base = base;
            }

            trace!(
                from = %bracket.from,
                rate = %bracket.rate_percent,
                %base,
                tax = %bracket_tax,
                "bracket"
            );
            details.push(BracketDetail {
                label: bracket_label(bracket),
                base,
                rate: bracket.rate_percent,
                tax: round_half_up(bracket_tax),
            });

            reached = bracket.to.is_none_or(|to| amount <= to);
        }

        ProgressiveTaxResult {
            tax: non_negative(tax),
            tmi_rate: marginal.map_or(Decimal::ZERO, |b| b.rate_percent),
            tmi_base: marginal_base,
            tmi_upper: marginal.and_then(|b| b.to),
            details,
        }
    }
}

fn empty_row(bracket: &TaxBracket) -> BracketDetail {
    BracketDetail {
        label: bracket_label(bracket),
        base: Decimal::ZERO,
        rate: bracket.rate_percent,
        tax: Decimal::ZERO,
    }
}

fn bracket_label(bracket: &TaxBracket) -> String {
    match bracket.to {
        Some(to) => format!("{} - {}", bracket.from.normalize(), to.normalize()),
        None => format!("{} +", bracket.from.normalize()),
    }
}

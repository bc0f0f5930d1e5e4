use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::lenient::{lenient_decimal, lenient_optional_decimal};

/// One slice of a progressive scale.
///
/// `to = None` marks the unbounded top bracket. Official French scales are
/// published with inclusive whole-euro bounds ("de 11 498 € à 29 315 €"), so
/// a bracket may start one euro above the previous upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub from: Decimal,
    #[serde(default, deserialize_with = "lenient_optional_decimal")]
    pub to: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate_percent: Decimal,
}

/// Structural problems found when validating a scale.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScaleError {
    #[error("scale has no brackets")]
    Empty,

    #[error("bracket {index} does not start above the previous bracket")]
    NotIncreasing { index: usize },

    #[error("bracket {index} starts at {from} but the previous bracket ends at {previous_to}")]
    NotContiguous {
        index: usize,
        previous_to: Decimal,
        from: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedNotLast { index: usize },

    #[error("the last bracket must be unbounded")]
    MissingUnbounded,

    #[error("bracket {index} has rate {rate}%, expected 0..=100")]
    InvalidRate { index: usize, rate: Decimal },
}

/// An ordered list of brackets forming one progressive scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxScale(Vec<TaxBracket>);

impl TaxScale {
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the structural invariants of the scale.
    ///
    /// The engine tolerates malformed scales and degrades to zero tax; this
    /// check is meant for the settings-loading boundary, where a bad table
    /// should be reported rather than silently used.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError`] if the scale is empty, if `from` bounds are not
    /// strictly increasing, if two consecutive brackets leave a gap larger
    /// than one euro (or overlap), if an unbounded bracket is not last, if
    /// the last bracket is bounded, or if a rate is outside `0..=100`.
    pub fn validate(&self) -> Result<(), ScaleError> {
        let Some(last) = self.0.last() else {
            return Err(ScaleError::Empty);
        };

        for (index, bracket) in self.0.iter().enumerate() {
            if bracket.rate_percent < Decimal::ZERO || bracket.rate_percent > Decimal::ONE_HUNDRED {
                return Err(ScaleError::InvalidRate {
                    index,
                    rate: bracket.rate_percent,
                });
            }
            if index == 0 {
                continue;
            }

            let previous = &self.0[index - 1];
            if bracket.from <= previous.from {
                return Err(ScaleError::NotIncreasing { index });
            }
            let Some(previous_to) = previous.to else {
                return Err(ScaleError::UnboundedNotLast { index: index - 1 });
            };
            let gap = bracket.from - previous_to;
            if gap < Decimal::ZERO || gap > Decimal::ONE {
                return Err(ScaleError::NotContiguous {
                    index,
                    previous_to,
                    from: bracket.from,
                });
            }
        }

        if last.to.is_some() {
            return Err(ScaleError::MissingUnbounded);
        }
        Ok(())
    }
}

impl From<Vec<TaxBracket>> for TaxScale {
    fn from(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }
}

//! Income-tax calculation stages.
//!
//! Each stage lives in its own module and is a pure function of its inputs
//! and the yearly settings. [`IncomeTaxCalculator`] chains them in order.

mod abatement;
mod capital;
mod cdhr;
mod cehr;
pub mod common;
mod decote;
mod dom;
mod income_tax;
mod parts;
mod progressive;
mod quotient_cap;
mod social;

pub use abatement::compute_abattement_10;
pub use capital::{BAREME_INCLUSION_RATIO, CapitalSplit, split_capital};
pub use cdhr::{CdhrInput, CdhrOutcome, compute_cdhr, normalize_min_rate};
pub use cehr::compute_cehr;
pub use decote::compute_decote;
pub use dom::compute_dom_abatement;
pub use income_tax::{IncomeTaxCalculator, YearComparison, compute_ir};
pub use parts::{PartsCalculator, PartsFromChildren, PartsFromCount};
pub use progressive::{ProgressiveScale, ProgressiveTaxResult};
pub use quotient_cap::{QuotientCapOutcome, apply_quotient_cap, household_tax};
pub use social::compute_social_contributions;

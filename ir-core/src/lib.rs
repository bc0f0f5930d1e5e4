//! French personal income tax (IR) engine.
//!
//! Every computation is a pure function of a [`TaxYearSettings`] value and an
//! [`IrRequest`]; see [`calculations::IncomeTaxCalculator`] for the entry
//! point.

pub mod calculations;
pub mod models;

pub use models::*;

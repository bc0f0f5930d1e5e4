//! File loading and presentation for the income-tax engine.
//!
//! Settings come from TOML, optionally with scales overridden from CSV;
//! household profiles come from TOML or JSON.

pub mod logging;
mod profile_loader;
mod scale_loader;
mod settings_loader;
pub mod summary;

pub use profile_loader::{ProfileFormat, ProfileLoader, ProfileLoaderError};
pub use scale_loader::{ScaleId, ScaleLoader, ScaleLoaderError, ScaleRecord};
pub use settings_loader::{SettingsLoader, SettingsLoaderError};

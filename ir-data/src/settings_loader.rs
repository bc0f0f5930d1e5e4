use std::fs;
use std::path::Path;

use ir_core::{ScaleError, TaxYearSettings};
use thiserror::Error;
use tracing::{debug, warn};

use crate::scale_loader::ScaleId;

/// Errors that can occur when loading tax-year settings.
#[derive(Debug, Error)]
pub enum SettingsLoaderError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid scale '{scale}': {source}")]
    InvalidScale {
        scale: &'static str,
        #[source]
        source: ScaleError,
    },
}

/// Loader for [`TaxYearSettings`] from TOML documents.
///
/// Every field is optional: missing tables resolve to their defaults and
/// disable the rule they configure. Non-numeric amounts read as zero.
///
/// ```toml
/// [pfu]
/// rate_ir = 12.8
///
/// [current]
/// label = "2025"
///
/// [[current.scale]]
/// from = 0
/// to = 11497
/// rate_percent = 0
/// ```
pub struct SettingsLoader;

impl SettingsLoader {
    /// Parse settings from TOML text. Scales are not validated.
    pub fn parse(text: &str) -> Result<TaxYearSettings, SettingsLoaderError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse the settings file at `path`.
    ///
    /// Scales are not validated here, since a CSV file may still replace
    /// them. Call [`SettingsLoader::validate`] once overrides are applied.
    pub fn load(path: &Path) -> Result<TaxYearSettings, SettingsLoaderError> {
        let text = fs::read_to_string(path)?;
        let settings = Self::parse(&text)?;

        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Checks every non-empty scale of `settings`.
    ///
    /// Empty scales are accepted with a warning: the engine treats them as
    /// zero tax.
    pub fn validate(settings: &TaxYearSettings) -> Result<(), SettingsLoaderError> {
        for id in ScaleId::ALL {
            let scale = id.scale(settings);
            if scale.is_empty() {
                warn!(scale = id.code(), "scale is empty");
                continue;
            }
            scale
                .validate()
                .map_err(|source| SettingsLoaderError::InvalidScale {
                    scale: id.code(),
                    source,
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_TOML: &str = r#"
[current]
label = "2025"

[[current.scale]]
from = 0
to = 11497
rate_percent = 0

[[current.scale]]
from = 11498
rate_percent = 11

[current.decote]
trigger_single = 1964
amount_single = "889"
rate_percent = 45.25

[current.quotient_cap]
plafond_part_sup = 1791

[cdhr]
min_effective_rate = 20
threshold_single = 250000
"#;

    #[test]
    fn test_parse_settings() {
        let settings = SettingsLoader::parse(TEST_TOML).expect("Failed to parse settings");

        assert_eq!(settings.current.label, "2025");
        assert_eq!(settings.current.scale.brackets().len(), 2);
        assert_eq!(settings.current.scale.brackets()[1].to, None);
        assert_eq!(settings.current.decote.amount_single, dec!(889));
        assert_eq!(settings.current.decote.rate_percent, dec!(45.25));
        assert_eq!(settings.current.quotient_cap.plafond_part_sup, dec!(1791));
        assert_eq!(settings.cdhr.threshold_single, dec!(250000));
    }

    #[test]
    fn test_parse_missing_tables_use_defaults() {
        let settings = SettingsLoader::parse(TEST_TOML).expect("Failed to parse settings");

        assert!(settings.previous.scale.is_empty());
        assert_eq!(settings.pfu.rate_ir, dec!(12.8));
        assert_eq!(settings.cdhr.decote_slope, dec!(0.825));
        assert_eq!(settings.social.patrimony_rate, dec!(0));
    }

    #[test]
    fn test_parse_non_numeric_amount_reads_as_zero() {
        let text = "[current.quotient_cap]\nplafond_part_sup = \"n/a\"\n";

        let settings = SettingsLoader::parse(text).expect("Failed to parse settings");

        assert_eq!(settings.current.quotient_cap.plafond_part_sup, dec!(0));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = SettingsLoader::parse("[current\nlabel = 1").expect_err("Should fail for bad TOML");

        assert!(matches!(err, SettingsLoaderError::Toml(_)));
    }

    #[test]
    fn test_validate_accepts_empty_scales() {
        let settings = SettingsLoader::parse(TEST_TOML).expect("Failed to parse settings");

        SettingsLoader::validate(&settings).expect("Empty scales are allowed");
    }

    #[test]
    fn test_validate_rejects_overlapping_brackets() {
        let text = r#"
[[previous.scale]]
from = 0
to = 20000
rate_percent = 0

[[previous.scale]]
from = 10000
rate_percent = 11
"#;
        let settings = SettingsLoader::parse(text).expect("Failed to parse settings");

        match SettingsLoader::validate(&settings) {
            Err(SettingsLoaderError::InvalidScale { scale, source }) => {
                assert_eq!(scale, "ir_previous");
                assert!(matches!(source, ScaleError::NotContiguous { index: 1, .. }));
            }
            other => panic!("expected InvalidScale, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = SettingsLoader::load(Path::new("does/not/exist.toml"))
            .expect_err("Should fail for missing file");

        assert!(matches!(err, SettingsLoaderError::Io(_)));
    }
}

use std::collections::BTreeMap;
use std::io::Read;

use ir_core::{ScaleError, TaxBracket, TaxScale, TaxYearSettings};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading scale data.
#[derive(Debug, Error)]
pub enum ScaleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown scale '{0}'")]
    UnknownScale(String),

    #[error("Invalid scale '{scale}': {source}")]
    InvalidScale {
        scale: &'static str,
        #[source]
        source: ScaleError,
    },
}

impl From<csv::Error> for ScaleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScaleLoaderError::CsvParse(err.to_string())
    }
}

/// The progressive scales a settings value carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScaleId {
    IrCurrent,
    IrPrevious,
    CehrSingle,
    CehrCouple,
}

impl ScaleId {
    pub const ALL: [ScaleId; 4] = [
        ScaleId::IrCurrent,
        ScaleId::IrPrevious,
        ScaleId::CehrSingle,
        ScaleId::CehrCouple,
    ];

    /// Maps a CSV scale identifier to a scale.
    ///
    /// - `ir_current` → income-tax scale of the current year
    /// - `ir_previous` → income-tax scale of the previous year
    /// - `cehr_single` / `cehr_couple` → CEHR scales by household type
    pub fn from_code(code: &str) -> Result<Self, ScaleLoaderError> {
        match code.trim() {
            "ir_current" => Ok(ScaleId::IrCurrent),
            "ir_previous" => Ok(ScaleId::IrPrevious),
            "cehr_single" => Ok(ScaleId::CehrSingle),
            "cehr_couple" => Ok(ScaleId::CehrCouple),
            other => Err(ScaleLoaderError::UnknownScale(other.to_string())),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ScaleId::IrCurrent => "ir_current",
            ScaleId::IrPrevious => "ir_previous",
            ScaleId::CehrSingle => "cehr_single",
            ScaleId::CehrCouple => "cehr_couple",
        }
    }

    pub fn scale(
        self,
        settings: &TaxYearSettings,
    ) -> &TaxScale {
        match self {
            ScaleId::IrCurrent => &settings.current.scale,
            ScaleId::IrPrevious => &settings.previous.scale,
            ScaleId::CehrSingle => &settings.cehr.single,
            ScaleId::CehrCouple => &settings.cehr.couple,
        }
    }

    fn scale_mut(
        self,
        settings: &mut TaxYearSettings,
    ) -> &mut TaxScale {
        match self {
            ScaleId::IrCurrent => &mut settings.current.scale,
            ScaleId::IrPrevious => &mut settings.previous.scale,
            ScaleId::CehrSingle => &mut settings.cehr.single,
            ScaleId::CehrCouple => &mut settings.cehr.couple,
        }
    }
}

/// A single record from a scales CSV file.
///
/// - `scale`: scale identifier (`ir_current`, `ir_previous`, `cehr_single`,
///   `cehr_couple`)
/// - `from`: lower bound of the bracket
/// - `to`: upper bound of the bracket (empty for unbounded)
/// - `rate_percent`: marginal rate in percent (e.g. 30 for 30%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScaleRecord {
    pub scale: String,
    pub from: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub to: Option<Decimal>,
    pub rate_percent: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive scales from CSV files.
///
/// Brackets are listed in ascending order, one row per bracket, and grouped
/// by their scale identifier. Scales found in the file replace the matching
/// scales of a settings value; scales absent from the file are left alone.
pub struct ScaleLoader;

impl ScaleLoader {
    /// Parse scale records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScaleRecord>, ScaleLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: ScaleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups records into validated scales, keeping file order within a
    /// scale.
    pub fn group(
        records: &[ScaleRecord]
    ) -> Result<BTreeMap<ScaleId, TaxScale>, ScaleLoaderError> {
        let mut groups: BTreeMap<ScaleId, Vec<TaxBracket>> = BTreeMap::new();

        for record in records {
            let id = ScaleId::from_code(&record.scale)?;
            groups.entry(id).or_default().push(TaxBracket {
                from: record.from,
                to: record.to,
                rate_percent: record.rate_percent,
            });
        }

        groups
            .into_iter()
            .map(|(id, brackets)| -> Result<(ScaleId, TaxScale), ScaleLoaderError> {
                let scale = TaxScale::new(brackets);
                scale
                    .validate()
                    .map_err(|source| ScaleLoaderError::InvalidScale {
                        scale: id.code(),
                        source,
                    })?;
                Ok((id, scale))
            })
            .collect()
    }

    /// Replaces the scales of `settings` with those found in `records`.
    ///
    /// Nothing is replaced unless every scale in the file is valid. Returns
    /// the number of scales replaced.
    pub fn apply(
        settings: &mut TaxYearSettings,
        records: &[ScaleRecord],
    ) -> Result<usize, ScaleLoaderError> {
        let scales = Self::group(records)?;
        let replaced = scales.len();

        for (id, scale) in scales {
            debug!(scale = id.code(), brackets = scale.brackets().len(), "scale loaded from CSV");
            *id.scale_mut(settings) = scale;
        }

        Ok(replaced)
    }
}

//! Lenient numeric deserialization.
//!
//! Declared amounts and settings values reach the engine from hand-edited
//! files and web forms. A missing, empty or non-numeric value must read as
//! zero instead of failing the whole document, so every money field goes
//! through these helpers.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Number(Decimal),
    Other(IgnoredAny),
}

fn read<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<LenientValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(LenientValue::Number(amount)) => Some(amount),
        Some(LenientValue::Other(_)) => {
            warn!("non-numeric amount coerced to zero");
            None
        }
        None => None,
    })
}

/// Reads an amount, falling back to zero for null or non-numeric input.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Reads an optional amount. Null and non-numeric input both read as `None`.
pub fn lenient_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    read(deserializer)
}

/// Reads a head count. Fractions are truncated and negatives read as zero.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let count = read(deserializer)?
        .filter(|value| *value > Decimal::ZERO)
        .and_then(|value| value.trunc().to_u32())
        .unwrap_or(0);
    Ok(count)
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::household::Location;
use crate::models::lenient::lenient_decimal;
use crate::models::tax_bracket::TaxScale;

/// Selects which set of yearly rules a computation runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearKey {
    #[default]
    Current,
    Previous,
}

/// Floor and ceiling of a 10% flat abatement. Zero disables the bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abatement10Config {
    #[serde(deserialize_with = "lenient_decimal")]
    pub plafond: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub plancher: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abatement10Rules {
    /// Applied per declarant to salaries and article 62 remuneration.
    pub salaries: Abatement10Config,
    /// Applied to the household pension total.
    pub pensions: Abatement10Config,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoteConfig {
    #[serde(deserialize_with = "lenient_decimal")]
    pub trigger_single: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub trigger_couple: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount_single: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount_couple: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub rate_percent: Decimal,
}

/// Ceilings on the advantage granted by the quotient familial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotientCapConfig {
    /// Ceiling per half-part beyond the base parts.
    #[serde(deserialize_with = "lenient_decimal")]
    pub plafond_part_sup: Decimal,
    /// Ceiling for the first two half-parts of an isolated parent.
    #[serde(deserialize_with = "lenient_decimal")]
    pub plafond_parent_iso_deux_premieres_parts: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomZoneConfig {
    #[serde(deserialize_with = "lenient_decimal")]
    pub rate_percent: Decimal,
    /// Zero means uncapped.
    #[serde(deserialize_with = "lenient_decimal")]
    pub cap: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub gmr: DomZoneConfig,
    pub guyane: DomZoneConfig,
}

impl DomConfig {
    pub fn zone(
        &self,
        location: Location,
    ) -> Option<&DomZoneConfig> {
        match location {
            Location::Metropole => None,
            Location::Gmr => Some(&self.gmr),
            Location::Guyane => Some(&self.guyane),
        }
    }
}

/// Rules that change from one income year to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRules {
    /// Display label, e.g. "2025 (revenus 2024)".
    pub label: String,
    pub scale: TaxScale,
    pub decote: DecoteConfig,
    pub quotient_cap: QuotientCapConfig,
    pub dom: DomConfig,
    pub abat10: Abatement10Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PfuConfig {
    /// Income-tax share of the flat tax, in percent.
    #[serde(deserialize_with = "lenient_decimal")]
    pub rate_ir: Decimal,
    /// Social-contribution share of the flat tax, in percent.
    #[serde(deserialize_with = "lenient_decimal")]
    pub rate_ps: Decimal,
}

impl PfuConfig {
    pub const DEFAULT_RATE_IR: Decimal = Decimal::from_parts(128, 0, 0, false, 1);
    pub const DEFAULT_RATE_PS: Decimal = Decimal::from_parts(172, 0, 0, false, 1);

    /// Income-tax share actually applied: a non-positive rate falls back
    /// to the default.
    pub fn effective_rate_ir(&self) -> Decimal {
        if self.rate_ir > Decimal::ZERO {
            self.rate_ir
        } else {
            Self::DEFAULT_RATE_IR
        }
    }
}

impl Default for PfuConfig {
    fn default() -> Self {
        Self {
            rate_ir: Self::DEFAULT_RATE_IR,
            rate_ps: Self::DEFAULT_RATE_PS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CehrConfig {
    pub single: TaxScale,
    pub couple: TaxScale,
}

impl CehrConfig {
    pub fn scale(
        &self,
        is_couple: bool,
    ) -> &TaxScale {
        if is_couple { &self.couple } else { &self.single }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdhrConfig {
    /// Either a fraction (0.20) or a percentage (20).
    #[serde(deserialize_with = "lenient_decimal")]
    pub min_effective_rate: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub threshold_single: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub threshold_couple: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub decote_max_assiette_single: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub decote_max_assiette_couple: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub decote_slope: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub majoration_couple: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub majoration_per_charge: Decimal,
}

impl CdhrConfig {
    pub const DEFAULT_DECOTE_SLOPE: Decimal = Decimal::from_parts(825, 0, 0, false, 3);
    pub const DEFAULT_MAJORATION_COUPLE: Decimal = Decimal::from_parts(12500, 0, 0, false, 0);
    pub const DEFAULT_MAJORATION_PER_CHARGE: Decimal = Decimal::from_parts(1500, 0, 0, false, 0);
}

impl Default for CdhrConfig {
    fn default() -> Self {
        Self {
            min_effective_rate: Decimal::ZERO,
            threshold_single: Decimal::ZERO,
            threshold_couple: Decimal::ZERO,
            decote_max_assiette_single: Decimal::ZERO,
            decote_max_assiette_couple: Decimal::ZERO,
            decote_slope: Self::DEFAULT_DECOTE_SLOPE,
            majoration_couple: Self::DEFAULT_MAJORATION_COUPLE,
            majoration_per_charge: Self::DEFAULT_MAJORATION_PER_CHARGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Total social-contribution rate on patrimony income, in percent.
    #[serde(deserialize_with = "lenient_decimal")]
    pub patrimony_rate: Decimal,
}

/// Fully resolved settings for one simulated tax year.
///
/// The engine reads this as an immutable value; caching, user overrides and
/// invalidation belong to whoever builds it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxYearSettings {
    pub current: YearRules,
    pub previous: YearRules,
    pub pfu: PfuConfig,
    pub cehr: CehrConfig,
    pub cdhr: CdhrConfig,
    pub social: SocialConfig,
}

impl TaxYearSettings {
    pub fn rules_for(
        &self,
        year: YearKey,
    ) -> &YearRules {
        match year {
            YearKey::Current => &self.current,
            YearKey::Previous => &self.previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_document_resolves_defaults() {
        let settings: TaxYearSettings = toml::from_str("").expect("empty settings should parse");

        assert_eq!(settings.pfu.rate_ir, dec!(12.8));
        assert_eq!(settings.pfu.rate_ps, dec!(17.2));
        assert_eq!(settings.cdhr.decote_slope, dec!(0.825));
        assert_eq!(settings.cdhr.majoration_couple, dec!(12500));
        assert_eq!(settings.cdhr.majoration_per_charge, dec!(1500));
        assert_eq!(settings.cdhr.min_effective_rate, Decimal::ZERO);
        assert!(settings.current.scale.is_empty());
        assert_eq!(settings.social.patrimony_rate, Decimal::ZERO);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let settings: TaxYearSettings = toml::from_str(
            r#"
            [cdhr]
            min_effective_rate = 20
            threshold_single = 250000

            [current.decote]
            trigger_single = 1964
            amount_single = 889
            rate_percent = "45.25"
            "#,
        )
        .expect("settings should parse");

        assert_eq!(settings.cdhr.min_effective_rate, dec!(20));
        assert_eq!(settings.cdhr.decote_slope, dec!(0.825));
        assert_eq!(settings.current.decote.trigger_single, dec!(1964));
        assert_eq!(settings.current.decote.rate_percent, dec!(45.25));
        assert_eq!(settings.current.decote.trigger_couple, Decimal::ZERO);
    }

    #[test]
    fn rules_for_selects_year() {
        let settings = TaxYearSettings {
            current: YearRules {
                label: "2025".to_string(),
                ..YearRules::default()
            },
            previous: YearRules {
                label: "2024".to_string(),
                ..YearRules::default()
            },
            ..TaxYearSettings::default()
        };

        assert_eq!(settings.rules_for(YearKey::Current).label, "2025");
        assert_eq!(settings.rules_for(YearKey::Previous).label, "2024");
    }

    #[test]
    fn dom_zone_lookup() {
        let dom = DomConfig {
            gmr: DomZoneConfig {
                rate_percent: dec!(30),
                cap: dec!(2450),
            },
            guyane: DomZoneConfig {
                rate_percent: dec!(40),
                cap: dec!(4050),
            },
        };

        assert_eq!(dom.zone(Location::Metropole), None);
        assert_eq!(dom.zone(Location::Gmr).map(|z| z.cap), Some(dec!(2450)));
        assert_eq!(dom.zone(Location::Guyane).map(|z| z.rate_percent), Some(dec!(40)));
    }
}

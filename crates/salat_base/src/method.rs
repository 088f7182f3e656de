//! Catalog of prayer-time calculation methods.
//!
//! A method fixes the solar depression for Fajr and either a depression
//! or a fixed delay after Maghrib for Isha. The table is immutable; per-call
//! adjustments go through [`crate::PrayerSettings`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ConfigError;

/// How Isha is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IshaRule {
    /// Sun at this many degrees below the horizon after sunset.
    Angle(f64),
    /// Fixed delay after Maghrib, in minutes, with a separate value for
    /// the month of Ramadan.
    FixedInterval { normal_min: u32, ramadan_min: u32 },
}

impl IshaRule {
    /// Delay after Maghrib in minutes, or `None` for an angle rule.
    pub fn interval_minutes(&self, ramadan: bool) -> Option<u32> {
        match *self {
            Self::Angle(_) => None,
            Self::FixedInterval {
                normal_min,
                ramadan_min,
            } => Some(if ramadan { ramadan_min } else { normal_min }),
        }
    }
}

/// Effective parameters for one computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodParams {
    /// Solar depression for Fajr, degrees.
    pub fajr_angle: f64,
    pub isha: IshaRule,
}

/// Named calculation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CalculationMethod {
    /// Islamic Society of North America.
    #[default]
    Isna,
    /// Muslim World League.
    Mwl,
    /// Egyptian General Authority of Survey.
    Egas,
    /// Umm al-Qura University, Makkah.
    Uqu,
    /// University of Islamic Sciences, Karachi.
    Uisk,
    /// Institute of Geophysics, University of Tehran.
    Ut,
    /// Shia Ithna Ashari, Leva Research Institute, Qum.
    Lri,
    /// Gulf region.
    Gulf,
    /// Jabatan Kemajuan Islam Malaysia.
    Jakim,
}

/// All 9 methods in enum order.
const ALL_METHODS: [CalculationMethod; 9] = [
    CalculationMethod::Isna,
    CalculationMethod::Mwl,
    CalculationMethod::Egas,
    CalculationMethod::Uqu,
    CalculationMethod::Uisk,
    CalculationMethod::Ut,
    CalculationMethod::Lri,
    CalculationMethod::Gulf,
    CalculationMethod::Jakim,
];

impl CalculationMethod {
    /// Catalog parameters.
    pub const fn params(self) -> MethodParams {
        let (fajr_angle, isha) = match self {
            Self::Isna => (15.0, IshaRule::Angle(15.0)),
            Self::Mwl => (18.0, IshaRule::Angle(17.0)),
            Self::Egas => (19.5, IshaRule::Angle(17.5)),
            Self::Uqu => (
                18.5,
                IshaRule::FixedInterval {
                    normal_min: 90,
                    ramadan_min: 120,
                },
            ),
            Self::Uisk => (18.0, IshaRule::Angle(18.0)),
            Self::Ut => (17.7, IshaRule::Angle(14.0)),
            Self::Lri => (16.0, IshaRule::Angle(14.0)),
            Self::Gulf => (
                19.5,
                IshaRule::FixedInterval {
                    normal_min: 90,
                    ramadan_min: 90,
                },
            ),
            Self::Jakim => (20.0, IshaRule::Angle(18.0)),
        };
        MethodParams { fajr_angle, isha }
    }

    /// Short lowercase key, as accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::Isna => "isna",
            Self::Mwl => "mwl",
            Self::Egas => "egas",
            Self::Uqu => "uqu",
            Self::Uisk => "uisk",
            Self::Ut => "ut",
            Self::Lri => "lri",
            Self::Gulf => "gulf",
            Self::Jakim => "jakim",
        }
    }

    /// Full name of the issuing body.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Isna => "Islamic Society of North America",
            Self::Mwl => "Muslim World League",
            Self::Egas => "Egyptian General Authority of Survey",
            Self::Uqu => "Umm al-Qura University, Makkah",
            Self::Uisk => "University of Islamic Sciences, Karachi",
            Self::Ut => "Institute of Geophysics, University of Tehran",
            Self::Lri => "Shia Ithna Ashari, Leva Research Institute, Qum",
            Self::Gulf => "Gulf Region",
            Self::Jakim => "Jabatan Kemajuan Islam Malaysia",
        }
    }

    /// All defined methods.
    pub const fn all() -> &'static [CalculationMethod] {
        &ALL_METHODS
    }
}

impl Display for CalculationMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CalculationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ALL_METHODS
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ConfigError::UnknownMethod(s.to_string()))
    }
}

/// Shadow-length convention for the start of Asr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AsrConvention {
    /// Shadow equals object length plus its noon shadow (Shafi'i, Maliki,
    /// Hanbali).
    #[default]
    Standard,
    /// Shadow equals twice the object length plus its noon shadow.
    Hanafi,
}

impl AsrConvention {
    /// Shadow-to-object ratio added to the noon shadow.
    pub const fn shadow_ratio(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Hanafi => 2.0,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hanafi => "hanafi",
        }
    }
}

impl Display for AsrConvention {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AsrConvention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "hanafi" => Ok(Self::Hanafi),
            _ => Err(ConfigError::UnknownAsrConvention(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_methods_count() {
        assert_eq!(CalculationMethod::all().len(), 9);
    }

    #[test]
    fn keys_round_trip() {
        for &m in CalculationMethod::all() {
            assert_eq!(m.key().parse::<CalculationMethod>(), Ok(m));
        }
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!("MWL".parse(), Ok(CalculationMethod::Mwl));
        assert_eq!(" Jakim ".parse(), Ok(CalculationMethod::Jakim));
    }

    #[test]
    fn unknown_method_rejected() {
        assert_eq!(
            "karachi2".parse::<CalculationMethod>(),
            Err(ConfigError::UnknownMethod("karachi2".into()))
        );
    }

    #[test]
    fn umm_al_qura_ramadan_interval() {
        let p = CalculationMethod::Uqu.params();
        assert_eq!(p.fajr_angle, 18.5);
        assert_eq!(p.isha.interval_minutes(false), Some(90));
        assert_eq!(p.isha.interval_minutes(true), Some(120));
    }

    #[test]
    fn gulf_ramadan_unchanged() {
        let p = CalculationMethod::Gulf.params();
        assert_eq!(p.isha.interval_minutes(true), Some(90));
    }

    #[test]
    fn angle_methods_have_no_interval() {
        let p = CalculationMethod::Mwl.params();
        assert_eq!(p.isha, IshaRule::Angle(17.0));
        assert_eq!(p.isha.interval_minutes(true), None);
    }

    #[test]
    fn catalog_angles_in_range() {
        for &m in CalculationMethod::all() {
            let p = m.params();
            assert!((0.0..=30.0).contains(&p.fajr_angle), "{m}");
            if let IshaRule::Angle(a) = p.isha {
                assert!((0.0..=30.0).contains(&a), "{m}");
            }
        }
    }

    #[test]
    fn asr_ratios() {
        assert_eq!(AsrConvention::Standard.shadow_ratio(), 1.0);
        assert_eq!(AsrConvention::Hanafi.shadow_ratio(), 2.0);
        assert_eq!("HANAFI".parse(), Ok(AsrConvention::Hanafi));
        assert!(matches!(
            "shafii".parse::<AsrConvention>(),
            Err(ConfigError::UnknownAsrConvention(_))
        ));
    }
}

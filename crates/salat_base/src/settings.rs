//! Per-computation settings: method, Asr convention, Hijri correction and
//! custom angle overrides.

use crate::error::ConfigError;
use crate::method::{AsrConvention, CalculationMethod, IshaRule, MethodParams};

/// Accepted range for override angles, degrees.
const ANGLE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=30.0;

/// Upper bound for an Isha interval override, minutes.
const MAX_ISHA_INTERVAL_MIN: u32 = 240;

/// User-selected settings.
///
/// The overrides replace the method's catalog values for one computation;
/// they are meant for matching a local mosque timetable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PrayerSettings {
    pub method: CalculationMethod,
    pub asr: AsrConvention,
    /// Whole-day shift applied to the tabular Hijri date.
    pub hijri_correction: i32,
    /// Fajr depression override, degrees.
    pub fajr_angle: Option<f64>,
    /// Isha depression override, degrees.
    pub isha_angle: Option<f64>,
    /// Fixed Isha delay override, minutes after Maghrib.
    pub isha_interval: Option<u32>,
}

impl PrayerSettings {
    pub fn new(method: CalculationMethod, asr: AsrConvention) -> Self {
        Self {
            method,
            asr,
            ..Self::default()
        }
    }

    /// Check override ranges and exclusivity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(value) = self.fajr_angle {
            check_angle("Fajr angle", value)?;
        }
        if let Some(value) = self.isha_angle {
            check_angle("Isha angle", value)?;
        }
        if let Some(minutes) = self.isha_interval {
            if minutes > MAX_ISHA_INTERVAL_MIN {
                return Err(ConfigError::IntervalOutOfRange(minutes));
            }
            if self.isha_angle.is_some() {
                return Err(ConfigError::ConflictingIshaOverride);
            }
        }
        Ok(())
    }

    /// Effective parameters after validating and applying overrides.
    ///
    /// An interval override applies both inside and outside Ramadan.
    pub fn resolve(&self) -> Result<MethodParams, ConfigError> {
        self.validate()?;
        let mut params = self.method.params();
        if let Some(angle) = self.fajr_angle {
            params.fajr_angle = angle;
        }
        if let Some(angle) = self.isha_angle {
            params.isha = IshaRule::Angle(angle);
        }
        if let Some(minutes) = self.isha_interval {
            params.isha = IshaRule::FixedInterval {
                normal_min: minutes,
                ramadan_min: minutes,
            };
        }
        Ok(params)
    }

    /// Whether any override is set.
    pub fn has_overrides(&self) -> bool {
        self.fajr_angle.is_some() || self.isha_angle.is_some() || self.isha_interval.is_some()
    }
}

fn check_angle(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if ANGLE_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::AngleOutOfRange { name, value })
    }
}

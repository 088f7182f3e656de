//! Inferring Fajr and Isha angles from observed times.
//!
//! Useful to find which parameters a local timetable uses. The inverse of
//! the angle solve is
//!
//! ```text
//! H = 15·|t − transit|
//! h = asin(cos H cos φ cos δ + sin φ sin δ),  angle = −h
//! ```
//!
//! and beyond the high-latitude threshold, the inverse of the night-fraction
//! rule: `angle = 60·Δt / night`.

use log::warn;
use salat_astro::{SolarEphemeris, altitude_at_hour_angle};
use salat_time::CalendarDate;

use crate::error::ReverseError;
use crate::prayer::{SolarDay, solar_day};
use crate::prayer_types::{EventTime, Location};

/// Accepted range for an inferred angle, degrees.
const VALID_RANGE: (f64, f64) = (0.0, 30.0);

/// Range of Fajr angles in use by published methods, degrees.
const FAJR_TYPICAL: (f64, f64) = (12.0, 21.0);

/// Range of Isha angles in use by published methods, degrees.
const ISHA_TYPICAL: (f64, f64) = (12.0, 20.0);

/// Fajr and Isha angles differing by more than this are flagged, degrees.
const LARGE_DIFFERENCE_DEG: f64 = 10.0;

/// Observed local clock times, fractional hours.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedTimes {
    pub fajr: f64,
    pub maghrib: f64,
    pub isha: f64,
}

/// Which inverse produced an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InferenceRule {
    /// Actual solar depression at the observed time.
    Standard,
    /// Night-fraction equivalent; not a physical solar angle.
    HighLatitude,
}

/// Caveats attached to an inferred angle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReverseWarning {
    /// Latitude beyond the threshold; the angle comes from the
    /// night-fraction rule.
    HighLatitudeRule { latitude: f64 },
    /// Plausible but unlike any published method.
    OutsideTypicalRange { angle: f64, low: f64, high: f64 },
    /// Outside [0, 30] degrees; the observed times are probably wrong.
    OutsideValidRange { angle: f64 },
    /// Fajr and Isha angles disagree by more than 10 degrees.
    LargeAngleDifference { difference: f64 },
}

/// One inferred angle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleEstimate {
    pub angle_deg: f64,
    pub rule: InferenceRule,
    /// Angle inside [0, 30] degrees.
    pub valid: bool,
    pub warnings: Vec<ReverseWarning>,
}

/// Result of [`reverse_calculate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReverseResult {
    pub fajr: AngleEstimate,
    pub isha: AngleEstimate,
    /// Minutes from Maghrib to Isha, to 0.1 min.
    pub isha_minutes: f64,
    pub transit: EventTime,
    /// Computed sunrise used for sequence checks.
    pub sunrise: EventTime,
    pub sun: SolarEphemeris,
    pub high_latitude: bool,
    /// Warnings that concern both angles together.
    pub warnings: Vec<ReverseWarning>,
}

impl ReverseResult {
    pub fn is_valid(&self) -> bool {
        self.fajr.valid && self.isha.valid
    }

    /// Warnings for Fajr, then Isha, then both.
    pub fn all_warnings(&self) -> impl Iterator<Item = &ReverseWarning> {
        self.fajr
            .warnings
            .iter()
            .chain(&self.isha.warnings)
            .chain(&self.warnings)
    }
}

/// Infer the Fajr and Isha angles that produce `observed` on `date`.
pub fn reverse_calculate(
    location: &Location,
    date: CalendarDate,
    utc_offset_hours: f64,
    observed: ObservedTimes,
) -> Result<ReverseResult, ReverseError> {
    location.validate().map_err(|e| ReverseError::Prayer(e.into()))?;
    let day = solar_day(location, date, utc_offset_hours)?;
    let ObservedTimes {
        fajr,
        maghrib,
        isha,
    } = observed;

    if !(fajr < day.sunrise && day.sunrise < maghrib && maghrib < isha) {
        return Err(ReverseError::Sequence {
            fajr,
            sunrise: day.sunrise,
            maghrib,
            isha,
        });
    }
    if fajr >= day.transit {
        return Err(ReverseError::FajrAfterNoon {
            fajr,
            noon: day.transit,
        });
    }

    let high_latitude = location.is_high_latitude();
    let night = day.sunrise + 24.0 - maghrib;

    let (fajr_angle, fajr_rule) = if high_latitude {
        (60.0 * (day.sunrise - fajr) / night, InferenceRule::HighLatitude)
    } else {
        let angle = standard_angle(location, &day, day.transit - fajr, "Fajr")?;
        (angle, InferenceRule::Standard)
    };
    let (isha_angle, isha_rule) = if high_latitude {
        (60.0 * (isha - maghrib) / night, InferenceRule::HighLatitude)
    } else {
        let angle = standard_angle(location, &day, isha - day.transit, "Isha")?;
        (angle, InferenceRule::Standard)
    };

    let fajr_est = estimate("Fajr", fajr_angle, fajr_rule, FAJR_TYPICAL, location);
    let isha_est = estimate("Isha", isha_angle, isha_rule, ISHA_TYPICAL, location);

    let mut warnings = Vec::new();
    let difference = (fajr_angle - isha_angle).abs();
    if difference > LARGE_DIFFERENCE_DEG {
        warnings.push(ReverseWarning::LargeAngleDifference { difference });
    }

    Ok(ReverseResult {
        fajr: fajr_est,
        isha: isha_est,
        isha_minutes: ((isha - maghrib) * 600.0).round() / 10.0,
        transit: EventTime::from_hours(day.transit),
        sunrise: EventTime::from_hours(day.sunrise),
        sun: day.sun,
        high_latitude,
        warnings,
    })
}

/// Depression angle of the Sun `offset_hours` from transit.
fn standard_angle(
    location: &Location,
    day: &SolarDay,
    offset_hours: f64,
    prayer: &'static str,
) -> Result<f64, ReverseError> {
    let h = offset_hours * 15.0;
    if !(0.0..=180.0).contains(&h) {
        return Err(ReverseError::HourAngleOutOfRange {
            prayer,
            hour_angle: h,
        });
    }
    Ok(-altitude_at_hour_angle(
        location.latitude_deg,
        day.sun.declination,
        h,
    ))
}

fn estimate(
    prayer: &str,
    angle: f64,
    rule: InferenceRule,
    typical: (f64, f64),
    location: &Location,
) -> AngleEstimate {
    let mut warnings = Vec::new();
    if rule == InferenceRule::HighLatitude {
        warnings.push(ReverseWarning::HighLatitudeRule {
            latitude: location.latitude_deg,
        });
    }

    let valid = (VALID_RANGE.0..=VALID_RANGE.1).contains(&angle);
    if !valid {
        warn!("{prayer} angle {angle:.2} deg outside valid range, check the observed times");
        warnings.push(ReverseWarning::OutsideValidRange { angle });
    } else if !(typical.0..=typical.1).contains(&angle) {
        warnings.push(ReverseWarning::OutsideTypicalRange {
            angle,
            low: typical.0,
            high: typical.1,
        });
    }

    AngleEstimate {
        angle_deg: angle,
        rule,
        valid,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{AsrConvention, CalculationMethod};
    use crate::prayer::compute_prayer_times;
    use crate::settings::PrayerSettings;

    fn observed_from(
        location: &Location,
        date: CalendarDate,
        tz: f64,
        method: CalculationMethod,
    ) -> ObservedTimes {
        let r = compute_prayer_times(
            location,
            date,
            tz,
            &PrayerSettings::new(method, AsrConvention::Standard),
        )
        .unwrap();
        ObservedTimes {
            fajr: r.precise.fajr.hours(),
            maghrib: r.precise.maghrib.hours(),
            isha: r.precise.isha.hours(),
        }
    }

    #[test]
    fn recovers_mwl_angles() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let obs = observed_from(&ny, date, -5.0, CalculationMethod::Mwl);
        let r = reverse_calculate(&ny, date, -5.0, obs).unwrap();
        assert!((r.fajr.angle_deg - 18.0).abs() < 1e-6, "fajr = {}", r.fajr.angle_deg);
        assert!((r.isha.angle_deg - 17.0).abs() < 1e-6, "isha = {}", r.isha.angle_deg);
        assert_eq!(r.fajr.rule, InferenceRule::Standard);
        assert!(r.is_valid());
        assert_eq!(r.all_warnings().count(), 0);
    }

    #[test]
    fn recovers_high_latitude_fraction() {
        let stockholm = Location::new(59.3293, 18.0686, 0.0);
        let date = CalendarDate::new(2025, 6, 21).unwrap();
        let obs = observed_from(&stockholm, date, 2.0, CalculationMethod::Mwl);
        let r = reverse_calculate(&stockholm, date, 2.0, obs).unwrap();
        assert!((r.fajr.angle_deg - 18.0).abs() < 1e-9);
        assert!((r.isha.angle_deg - 17.0).abs() < 1e-9);
        assert_eq!(r.isha.rule, InferenceRule::HighLatitude);
        assert!(r.high_latitude);
        assert!(matches!(
            r.fajr.warnings[0],
            ReverseWarning::HighLatitudeRule { .. }
        ));
    }

    #[test]
    fn isha_minutes_one_decimal() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let mut obs = observed_from(&ny, date, -5.0, CalculationMethod::Isna);
        obs.isha = obs.maghrib + 90.04 / 60.0;
        let r = reverse_calculate(&ny, date, -5.0, obs).unwrap();
        assert!((r.isha_minutes - 90.0).abs() < 1e-9, "{}", r.isha_minutes);
    }

    #[test]
    fn rejects_isha_before_maghrib() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let obs = ObservedTimes {
            fajr: 6.0,
            maghrib: 16.7,
            isha: 16.5,
        };
        assert!(matches!(
            reverse_calculate(&ny, date, -5.0, obs),
            Err(ReverseError::Sequence { .. })
        ));
    }

    #[test]
    fn rejects_fajr_after_sunrise() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let obs = ObservedTimes {
            fajr: 7.5,
            maghrib: 16.7,
            isha: 18.0,
        };
        assert!(matches!(
            reverse_calculate(&ny, date, -5.0, obs),
            Err(ReverseError::Sequence { .. })
        ));
    }

    #[test]
    fn unusual_angles_flagged() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let mut obs = observed_from(&ny, date, -5.0, CalculationMethod::Isna);
        // Isha 20 min after Maghrib: a shallow angle.
        obs.isha = obs.maghrib + 20.0 / 60.0;
        let r = reverse_calculate(&ny, date, -5.0, obs).unwrap();
        assert!(r.isha.angle_deg < 12.0, "isha = {}", r.isha.angle_deg);
        assert!(r.isha.valid);
        assert!(matches!(
            r.isha.warnings[0],
            ReverseWarning::OutsideTypicalRange { low: 12.0, high: 20.0, .. }
        ));
    }

    #[test]
    fn fajr_far_too_early_is_invalid() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let mut obs = observed_from(&ny, date, -5.0, CalculationMethod::Isna);
        obs.fajr = 3.0;
        let r = reverse_calculate(&ny, date, -5.0, obs).unwrap();
        assert!(r.fajr.angle_deg > 30.0, "fajr = {}", r.fajr.angle_deg);
        assert!(!r.fajr.valid);
        assert!(!r.is_valid());
        assert!(r
            .warnings
            .iter()
            .any(|w| matches!(w, ReverseWarning::LargeAngleDifference { .. })));
    }

    #[test]
    fn hour_angle_beyond_half_day() {
        let ny = Location::new(40.7128, -74.0060, 10.0);
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        let obs = ObservedTimes {
            fajr: -1.0,
            maghrib: 16.7,
            isha: 18.0,
        };
        assert!(matches!(
            reverse_calculate(&ny, date, -5.0, obs),
            Err(ReverseError::HourAngleOutOfRange { prayer: "Fajr", .. })
        ));
    }
}

//! Prayer-time computation for one location and date.
//!
//! Everything is derived from a single solar position evaluated at the
//! approximate local noon of the date:
//!
//! ```text
//! transit = 12 + tz - λ/15 - EoT/60
//! event   = transit ∓ H(h)/15
//! ```
//!
//! where `H(h)` is the hour angle at which the Sun has altitude `h`. When
//! the Sun never reaches the Fajr or Isha depression, or the latitude is
//! beyond [`HIGH_LATITUDE_THRESHOLD_DEG`], those events are placed at a
//! fraction `angle/60` of the night instead.

use log::{debug, trace};
use salat_astro::{
    AstroError, SolarEphemeris, acot_deg, approximate_local_noon_jd, horizon_altitude,
    hour_angle, solar_ephemeris, tan_deg, transit_local_hours,
};
use salat_time::{CalendarDate, days_in_month, jd_to_hijri};

use crate::error::{PolarCondition, PrayerError};
use crate::method::IshaRule;
use crate::prayer_types::{
    EventTime, FallbackReason, HIGH_LATITUDE_THRESHOLD_DEG, Location, PrayerTimes,
    PrayerTimesResult, TwilightRule,
};
use crate::qibla::qibla;
use crate::settings::PrayerSettings;

/// Delay of Dhuhr after solar transit, hours (65 s).
const DHUHR_OFFSET_HOURS: f64 = 65.0 / 3600.0;

/// Sun geometry of one day, shared by all events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    /// Julian Date at 0h UT of the date.
    pub jd_midnight: f64,
    pub sun: SolarEphemeris,
    /// Local clock hours of solar transit.
    pub transit: f64,
    pub sunrise: f64,
    pub maghrib: f64,
}

impl SolarDay {
    /// Hours from Maghrib to the next sunrise, taking tomorrow's sunrise as
    /// today's plus 24 h.
    pub fn night_hours(&self) -> f64 {
        self.sunrise + 24.0 - self.maghrib
    }
}

/// Transit, sunrise and sunset for a date.
///
/// Fails with [`PrayerError::Polar`] when the Sun does not cross the
/// (elevation-corrected) horizon that day.
pub fn solar_day(
    location: &Location,
    date: CalendarDate,
    utc_offset_hours: f64,
) -> Result<SolarDay, PrayerError> {
    let jd_midnight = date.to_jd();
    let jd_noon = approximate_local_noon_jd(jd_midnight, location.longitude_deg);
    let sun = solar_ephemeris(jd_noon);

    let transit = transit_local_hours(
        location.longitude_deg,
        utc_offset_hours,
        sun.equation_of_time,
    );

    let h0 = horizon_altitude(location.elevation_m);
    let h = hour_angle(location.latitude_deg, sun.declination, h0).map_err(polar_condition)?;
    trace!("{date}: transit {transit:.4} h, horizon H {h:.4} deg");

    Ok(SolarDay {
        jd_midnight,
        sun,
        transit,
        sunrise: transit - h / 15.0,
        maghrib: transit + h / 15.0,
    })
}

fn polar_condition(e: AstroError) -> PrayerError {
    match e {
        // cos H > 1: the horizon altitude is above the Sun's noon altitude.
        AstroError::Domain { value, .. } if value > 1.0 => {
            PrayerError::Polar(PolarCondition::NeverRises)
        }
        AstroError::Domain { .. } => PrayerError::Polar(PolarCondition::NeverSets),
        other => PrayerError::Astro(other),
    }
}

/// Place Fajr (`morning`) or Isha at a solar depression of `angle` degrees.
fn twilight(location: &Location, day: &SolarDay, angle: f64, morning: bool) -> (f64, TwilightRule) {
    let reason = if location.is_high_latitude() {
        FallbackReason::HighLatitude
    } else {
        match hour_angle(location.latitude_deg, day.sun.declination, -angle) {
            Ok(h) => {
                let t = if morning {
                    day.transit - h / 15.0
                } else {
                    day.transit + h / 15.0
                };
                return (t, TwilightRule::Angle);
            }
            Err(e) => {
                debug!("depression {angle} deg not reached ({e}), using night fraction");
                FallbackReason::Unreachable
            }
        }
    };

    let portion = day.night_hours() * angle / 60.0;
    let t = if morning {
        day.sunrise - portion
    } else {
        day.maghrib + portion
    };
    (t, TwilightRule::NightFraction(reason))
}

/// Altitude of the Sun when Asr begins.
///
/// A vertical object's shadow equals `ratio` times its height plus its noon
/// shadow: `h = atan(1 / (ratio + tan|φ - δ|))`.
///
/// `None` when the Sun's centre stays at or below the geometric horizon at
/// noon (`|φ - δ| >= 90°`): there is no noon shadow to extend.
pub fn asr_altitude(latitude_deg: f64, declination_deg: f64, shadow_ratio: f64) -> Option<f64> {
    let zenith = (latitude_deg - declination_deg).abs();
    if zenith >= 90.0 {
        return None;
    }
    Some(acot_deg(shadow_ratio + tan_deg(zenith)))
}

/// Asr by the shadow rule, or halfway between Dhuhr and Maghrib when the
/// shadow rule has no solution inside that window.
fn asr_time(location: &Location, day: &SolarDay, dhuhr: f64, shadow_ratio: f64) -> f64 {
    let (lat, dec) = (location.latitude_deg, day.sun.declination);
    let shadow = asr_altitude(lat, dec, shadow_ratio)
        .and_then(|alt| hour_angle(lat, dec, alt).ok())
        .map(|h| day.transit + h / 15.0)
        .filter(|&t| t > dhuhr && t < day.maghrib);
    match shadow {
        Some(t) => t,
        None => {
            debug!("noon Sun too low for the shadow rule, Asr at mid-afternoon");
            dhuhr + (day.maghrib - dhuhr) / 2.0
        }
    }
}

/// Compute the six daily events for a location, date and settings.
///
/// `utc_offset_hours` is the zone offset east of Greenwich that the times
/// are expressed in.
pub fn compute_prayer_times(
    location: &Location,
    date: CalendarDate,
    utc_offset_hours: f64,
    settings: &PrayerSettings,
) -> Result<PrayerTimesResult, PrayerError> {
    location.validate()?;
    let params = settings.resolve()?;
    let day = solar_day(location, date, utc_offset_hours)?;
    let lat = location.latitude_deg;
    let dec = day.sun.declination;

    if location.is_high_latitude() {
        debug!(
            "latitude {lat} beyond {HIGH_LATITUDE_THRESHOLD_DEG} deg, \
             Fajr/Isha by night fraction"
        );
    }

    // On days only minutes long the offset must not push Dhuhr past sunset.
    let dhuhr = day.transit + DHUHR_OFFSET_HOURS.min((day.maghrib - day.transit) / 3.0);
    let (fajr, fajr_rule) = twilight(location, &day, params.fajr_angle, true);

    let hijri = jd_to_hijri(day.jd_midnight, settings.hijri_correction);
    let (isha, isha_rule) = match params.isha {
        IshaRule::Angle(angle) => twilight(location, &day, angle, false),
        IshaRule::FixedInterval {
            normal_min,
            ramadan_min,
        } => {
            let minutes = if hijri.is_ramadan() {
                ramadan_min
            } else {
                normal_min
            };
            (
                day.maghrib + f64::from(minutes) / 60.0,
                TwilightRule::FixedInterval(minutes),
            )
        }
    };

    let asr = asr_time(location, &day, dhuhr, settings.asr.shadow_ratio());

    let precise = PrayerTimes {
        fajr: EventTime::from_hours(fajr),
        sunrise: EventTime::from_hours(day.sunrise),
        dhuhr: EventTime::from_hours(dhuhr),
        asr: EventTime::from_hours(asr),
        maghrib: EventTime::from_hours(day.maghrib),
        isha: EventTime::from_hours(isha),
    };
    trace!("{date}: {precise:?}");

    Ok(PrayerTimesResult {
        date,
        utc_offset_hours,
        precise,
        rounded: precise.rounded(),
        transit: EventTime::from_hours(day.transit),
        hijri,
        qibla: qibla(lat, location.longitude_deg),
        params,
        fajr_rule,
        isha_rule,
        sun: day.sun,
    })
}

/// One day of a monthly timetable.
pub type DailyResult = (CalendarDate, Result<PrayerTimesResult, PrayerError>);

/// Compute every day of a Gregorian month.
///
/// Days without sunrise or sunset carry their own error; only invalid
/// input fails the whole month.
pub fn compute_month(
    location: &Location,
    year: i32,
    month: u32,
    utc_offset_hours: f64,
    settings: &PrayerSettings,
) -> Result<Vec<DailyResult>, PrayerError> {
    location.validate()?;
    settings.validate()?;
    let last = days_in_month(year, month)?;
    let mut date = CalendarDate::new(year, month, 1)?;
    let mut out = Vec::with_capacity(last as usize);
    for _ in 0..last {
        out.push((
            date,
            compute_prayer_times(location, date, utc_offset_hours, settings),
        ));
        date = date.succ();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{AsrConvention, CalculationMethod};

    fn new_york() -> Location {
        Location::new(40.7128, -74.0060, 10.0)
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn hm(e: EventTime) -> (u32, u32) {
        let c = e.clock();
        (c.hour, c.minute)
    }

    #[test]
    fn new_york_isna() {
        let r = compute_prayer_times(
            &new_york(),
            date(2025, 1, 1),
            -5.0,
            &PrayerSettings::default(),
        )
        .unwrap();
        assert_eq!(hm(r.rounded.fajr), (5, 58));
        assert_eq!(hm(r.rounded.sunrise), (7, 19));
        assert_eq!(hm(r.rounded.dhuhr), (12, 1));
        assert_eq!(hm(r.rounded.asr), (14, 22));
        assert_eq!(hm(r.rounded.maghrib), (16, 40));
        assert_eq!(hm(r.rounded.isha), (18, 1));
        assert_eq!(r.fajr_rule, TwilightRule::Angle);
        assert_eq!(r.isha_rule, TwilightRule::Angle);
        assert!(!r.used_night_fraction());
    }

    #[test]
    fn dhuhr_trails_transit() {
        let r = compute_prayer_times(
            &new_york(),
            date(2025, 1, 1),
            -5.0,
            &PrayerSettings::default(),
        )
        .unwrap();
        let secs = (r.precise.dhuhr.hours() - r.transit.hours()) * 3600.0;
        assert!((secs - 65.0).abs() < 1e-6, "offset = {secs}");
    }

    #[test]
    fn hanafi_asr_later() {
        let std = compute_prayer_times(
            &new_york(),
            date(2025, 1, 1),
            -5.0,
            &PrayerSettings::default(),
        )
        .unwrap();
        let han = compute_prayer_times(
            &new_york(),
            date(2025, 1, 1),
            -5.0,
            &PrayerSettings::new(CalculationMethod::Isna, AsrConvention::Hanafi),
        )
        .unwrap();
        let diff = han.precise.asr.minutes_since(std.precise.asr);
        assert!((diff - 37.0).abs() < 1.0, "diff = {diff}");
        assert_eq!(han.precise.fajr, std.precise.fajr);
    }

    #[test]
    fn asr_altitude_equator_equinox() {
        let h = asr_altitude(0.0, 0.0, 1.0).unwrap();
        assert!((h - 45.0).abs() < 1e-12, "h = {h}");
        let h = asr_altitude(0.0, 0.0, 2.0).unwrap();
        assert!((h - 26.565_051).abs() < 1e-6, "h = {h}");
    }

    #[test]
    fn asr_altitude_below_noon_altitude() {
        // Noon altitude 0.5°.
        let h = asr_altitude(66.0, -23.5, 1.0).unwrap();
        assert!(h > 0.0 && h < 0.5, "h = {h}");
        assert_eq!(asr_altitude(67.0, -23.44, 1.0), None);
        assert_eq!(asr_altitude(-67.0, 23.44, 2.0), None);
    }

    #[test]
    fn sun_below_horizon_at_noon_still_has_asr() {
        // Refraction lifts the Sun above the horizon, but its centre stays
        // below 0° all day.
        let loc = Location::new(67.0, 20.0, 0.0);
        let day = date(2024, 12, 21);
        assert!(solar_day(&loc, day, 1.0).is_ok());
        for &method in CalculationMethod::all() {
            for asr in [AsrConvention::Standard, AsrConvention::Hanafi] {
                let r = compute_prayer_times(&loc, day, 1.0, &PrayerSettings::new(method, asr))
                    .unwrap();
                assert!(r.precise.is_strictly_ordered(), "{method:?} {asr:?}: {:?}", r.precise);
                let mid = (r.precise.dhuhr.hours() + r.precise.maghrib.hours()) / 2.0;
                assert!((r.precise.asr.hours() - mid).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn asr_after_dhuhr_when_noon_sun_grazes_horizon() {
        let loc = Location::new(66.5, 0.0, 0.0);
        let r = compute_prayer_times(&loc, date(2025, 12, 19), 0.0, &PrayerSettings::default())
            .unwrap();
        assert!(r.precise.asr > r.precise.dhuhr, "{:?}", r.precise);
        assert!(r.precise.is_strictly_ordered(), "{:?}", r.precise);
    }

    #[test]
    fn polar_night() {
        let tromso = Location::new(69.6492, 18.9553, 0.0);
        let r = compute_prayer_times(&tromso, date(2024, 12, 21), 1.0, &PrayerSettings::default());
        assert_eq!(r, Err(PrayerError::Polar(PolarCondition::NeverRises)));
    }

    #[test]
    fn midnight_sun() {
        let tromso = Location::new(69.6492, 18.9553, 0.0);
        let r = compute_prayer_times(&tromso, date(2024, 6, 21), 2.0, &PrayerSettings::default());
        assert_eq!(r, Err(PrayerError::Polar(PolarCondition::NeverSets)));
    }

    #[test]
    fn invalid_location_rejected() {
        let r = compute_prayer_times(
            &Location::new(95.0, 0.0, 0.0),
            date(2025, 1, 1),
            0.0,
            &PrayerSettings::default(),
        );
        assert!(matches!(r, Err(PrayerError::Config(_))));
    }

    #[test]
    fn month_has_every_day() {
        let days = compute_month(&new_york(), 2024, 2, -5.0, &PrayerSettings::default()).unwrap();
        assert_eq!(days.len(), 29);
        assert_eq!(days[28].0, date(2024, 2, 29));
        assert!(days.iter().all(|(_, r)| r.is_ok()));
    }

    #[test]
    fn month_rejects_bad_month() {
        let r = compute_month(&new_york(), 2024, 13, -5.0, &PrayerSettings::default());
        assert!(matches!(r, Err(PrayerError::Time(_))));
    }

    #[test]
    fn solar_day_symmetric_about_transit() {
        let d = solar_day(&new_york(), date(2025, 1, 1), -5.0).unwrap();
        let am = d.transit - d.sunrise;
        let pm = d.maghrib - d.transit;
        assert!((am - pm).abs() < 1e-12);
        assert!(d.night_hours() > 12.0);
    }
}

//! Hour-angle geometry: the link between solar altitude and clock time.

use crate::error::AstroError;
use crate::trig::{acos_deg, cos_deg, sin_deg};

/// Standard refraction (34') plus mean solar semidiameter (16'), degrees.
const HORIZON_DIP_DEG: f64 = 0.8333;

/// Dip of the horizon per √metre of observer elevation, degrees.
const ELEVATION_DIP_DEG: f64 = 0.0347;

/// Approximate local solar noon JD from 0h UT JD and longitude.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

/// Local clock time (hours) of the Sun's meridian transit.
///
/// `T = 12 + utc_offset - longitude/15 - EoT/60`, with EoT in minutes as
/// apparent minus mean solar time.
pub fn transit_local_hours(longitude_deg: f64, utc_offset_hours: f64, eot_minutes: f64) -> f64 {
    12.0 + utc_offset_hours - longitude_deg / 15.0 - eot_minutes / 60.0
}

/// Geometric altitude of the Sun's centre at apparent sunrise/sunset.
///
/// `-(0.8333 + 0.0347·√h)` for an observer `h` metres above the surrounding
/// terrain. Negative elevations are treated as sea level.
pub fn horizon_altitude(elevation_m: f64) -> f64 {
    -(HORIZON_DIP_DEG + ELEVATION_DIP_DEG * elevation_m.max(0.0).sqrt())
}

/// Hour angle (degrees, in [0, 180]) at which the Sun has altitude `alt_deg`.
///
/// `cos H = (sin h - sin φ sin δ) / (cos φ cos δ)`
///
/// Returns [`AstroError::Domain`] when |cos H| > 1: on that day the Sun
/// never descends to (cos H > 1) or never climbs to (cos H < -1) the
/// requested altitude. The caller applies the sign (morning negative).
pub fn hour_angle(lat_deg: f64, dec_deg: f64, alt_deg: f64) -> Result<f64, AstroError> {
    let cos_h = (sin_deg(alt_deg) - sin_deg(lat_deg) * sin_deg(dec_deg))
        / (cos_deg(lat_deg) * cos_deg(dec_deg));
    acos_deg(cos_h)
}

/// Solar altitude (degrees) at hour angle `h_deg`.
///
/// Inverse of [`hour_angle`]: `sin h = cos H cos φ cos δ + sin φ sin δ`,
/// with the sine clamped to [-1, 1] against rounding at the poles.
pub fn altitude_at_hour_angle(lat_deg: f64, dec_deg: f64, h_deg: f64) -> f64 {
    let s = cos_deg(h_deg) * cos_deg(lat_deg) * cos_deg(dec_deg)
        + sin_deg(lat_deg) * sin_deg(dec_deg);
    s.clamp(-1.0, 1.0).asin().to_degrees()
}

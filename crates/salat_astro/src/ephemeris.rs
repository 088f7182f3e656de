//! Low-precision solar ephemeris.
//!
//! Mean elements referred to J2000.0 with a two-term equation of centre,
//! as tabulated in the Astronomical Almanac "low precision formulas for the
//! Sun". No failure modes.

use salat_time::J2000_JD;

use crate::trig::{atan2_deg, cos_deg, normalize_360, sin_deg, wrap_180};

/// Apparent solar semidiameter at 1 AU, in degrees.
const SEMIDIAMETER_1AU_DEG: f64 = 0.2666;

/// Position of the Sun for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolarEphemeris {
    /// Mean longitude L, degrees in [0, 360).
    pub mean_longitude: f64,
    /// Mean anomaly g, degrees in [0, 360).
    pub mean_anomaly: f64,
    /// Apparent ecliptic longitude λ, degrees (not reduced).
    pub ecliptic_longitude: f64,
    /// Obliquity of the ecliptic ε, degrees.
    pub obliquity: f64,
    /// Right ascension α, degrees in [0, 360).
    pub right_ascension: f64,
    /// Declination δ, degrees in [-ε, ε].
    pub declination: f64,
    /// Equation of time in minutes (apparent minus mean solar time).
    pub equation_of_time: f64,
    /// Earth–Sun distance in AU.
    pub distance_au: f64,
    /// Apparent semidiameter, degrees.
    pub semidiameter_deg: f64,
}

/// Mean obliquity of the ecliptic, `days` after J2000.0.
pub fn mean_obliquity(days: f64) -> f64 {
    23.440 - 0.000_000_4 * days
}

/// Compute the solar ephemeris at a Julian Date.
pub fn solar_ephemeris(jd: f64) -> SolarEphemeris {
    let n = jd - J2000_JD;

    let l = normalize_360(280.466 + 0.985_647_4 * n);
    let g = normalize_360(357.528 + 0.985_600_3 * n);
    let lambda = l + 1.915 * sin_deg(g) + 0.020 * sin_deg(2.0 * g);
    let eps = mean_obliquity(n);

    let alpha = atan2_deg(cos_deg(eps) * sin_deg(lambda), cos_deg(lambda));
    // ε stays near 23.4°, so the argument is well inside [-1, 1].
    let delta = (sin_deg(eps) * sin_deg(lambda)).asin().to_degrees();

    // L and α can sit on opposite sides of 0°; compare on one branch.
    let eot = wrap_180(l - alpha) * 4.0;

    let r = 1.000_14 - 0.016_71 * cos_deg(g) - 0.000_14 * cos_deg(2.0 * g);

    SolarEphemeris {
        mean_longitude: l,
        mean_anomaly: g,
        ecliptic_longitude: lambda,
        obliquity: eps,
        right_ascension: alpha,
        declination: delta,
        equation_of_time: eot,
        distance_au: r,
        semidiameter_deg: SEMIDIAMETER_1AU_DEG / r,
    }
}

//! Great-circle direction to the Kaaba.

use salat_astro::{atan2_deg, cos_deg, sin_deg};

/// Latitude of the Kaaba, degrees north.
pub const KAABA_LATITUDE_DEG: f64 = 21.4225;

/// Longitude of the Kaaba, degrees east.
pub const KAABA_LONGITUDE_DEG: f64 = 39.8262;

/// Central angle (degrees) within which the direction is undefined:
/// about 11 m at the Kaaba or its antipode.
const DEGENERATE_EPS_DEG: f64 = 1e-4;

/// Qibla direction from an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Qibla {
    /// Initial great-circle bearing, degrees clockwise from true north in
    /// [0, 360), rounded to 0.01°.
    Bearing(f64),
    /// Observer is at the Kaaba: every direction is as good as any other.
    AtKaaba,
    /// Observer is at the antipode of the Kaaba: every great circle through
    /// the observer reaches it.
    Antipodal,
}

impl Qibla {
    pub fn bearing(self) -> Option<f64> {
        match self {
            Self::Bearing(b) => Some(b),
            Self::AtKaaba | Self::Antipodal => None,
        }
    }
}

/// Angular distance between two points on the sphere, degrees in [0, 180].
///
/// Haversine form, which stays accurate for tiny separations.
pub fn central_angle_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let half_dlat = sin_deg((lat2 - lat1) / 2.0);
    let half_dlon = sin_deg((lon2 - lon1) / 2.0);
    let a = half_dlat * half_dlat + cos_deg(lat1) * cos_deg(lat2) * half_dlon * half_dlon;
    2.0 * a.sqrt().clamp(0.0, 1.0).asin().to_degrees()
}

/// Direction to the Kaaba from (`lat_deg`, `lon_deg`).
///
/// ```text
/// ΔL = λ_k − λ
/// y  = sin ΔL · cos φ_k
/// x  = cos φ · sin φ_k − sin φ · cos φ_k · cos ΔL
/// bearing = atan2(y, x)
/// ```
pub fn qibla(lat_deg: f64, lon_deg: f64) -> Qibla {
    let c = central_angle_deg(lat_deg, lon_deg, KAABA_LATITUDE_DEG, KAABA_LONGITUDE_DEG);
    if c < DEGENERATE_EPS_DEG {
        return Qibla::AtKaaba;
    }
    if c > 180.0 - DEGENERATE_EPS_DEG {
        return Qibla::Antipodal;
    }

    let dl = KAABA_LONGITUDE_DEG - lon_deg;
    let y = sin_deg(dl) * cos_deg(KAABA_LATITUDE_DEG);
    let x = cos_deg(lat_deg) * sin_deg(KAABA_LATITUDE_DEG)
        - sin_deg(lat_deg) * cos_deg(KAABA_LATITUDE_DEG) * cos_deg(dl);
    let rounded = (atan2_deg(y, x) * 100.0).round() / 100.0;
    // 359.996 rounds up to 360.00
    Qibla::Bearing(if rounded >= 360.0 { 0.0 } else { rounded })
}

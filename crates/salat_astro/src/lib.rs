//! Solar position and hour-angle geometry for prayer-time computation.
//!
//! All angles are in degrees. The ephemeris is the low-precision almanac
//! model (about 0.01° in declination between 1950 and 2050), which is well
//! inside the minute-level precision of a published timetable.

pub mod ephemeris;
pub mod error;
pub mod hour_angle;
pub mod trig;

pub use ephemeris::{SolarEphemeris, mean_obliquity, solar_ephemeris};
pub use error::AstroError;
pub use hour_angle::{
    altitude_at_hour_angle, approximate_local_noon_jd, horizon_altitude, hour_angle,
    transit_local_hours,
};
pub use trig::{
    acos_deg, acot_deg, asin_deg, atan2_deg, cos_deg, cot_deg, normalize_360, sin_deg, tan_deg,
    wrap_180,
};

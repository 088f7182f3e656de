//! Islamic prayer times, Qibla direction and timetable analysis.
//!
//! This crate provides:
//! - The calculation-method catalog and Asr conventions
//! - Settings with custom angle and interval overrides
//! - Daily and monthly prayer times with a high-latitude night-fraction rule
//! - Great-circle Qibla bearing with explicit degenerate cases
//! - Inference of Fajr/Isha angles from an observed timetable
//!
//! All computations are pure functions of their inputs.

pub mod error;
pub mod method;
pub mod prayer;
pub mod prayer_types;
pub mod qibla;
pub mod reverse;
pub mod settings;

pub use error::{ConfigError, PolarCondition, PrayerError, ReverseError};
pub use method::{AsrConvention, CalculationMethod, IshaRule, MethodParams};
pub use prayer::{
    DailyResult, SolarDay, asr_altitude, compute_month, compute_prayer_times, solar_day,
};
pub use prayer_types::{
    ClockTime, EventTime, FallbackReason, HIGH_LATITUDE_THRESHOLD_DEG, Location, Prayer,
    PrayerTimes, PrayerTimesResult, TwilightRule,
};
pub use qibla::{KAABA_LATITUDE_DEG, KAABA_LONGITUDE_DEG, Qibla, central_angle_deg, qibla};
pub use reverse::{
    AngleEstimate, InferenceRule, ObservedTimes, ReverseResult, ReverseWarning,
    reverse_calculate,
};
pub use settings::PrayerSettings;

pub use salat_time::{CalendarDate, HijriDate, HijriMonth};

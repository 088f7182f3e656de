//! Error types for prayer-time configuration and computation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use salat_astro::AstroError;
use salat_time::TimeError;

/// Rejected configuration or location input.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Method key not in the catalog.
    UnknownMethod(String),
    /// Asr convention other than `standard` / `hanafi`.
    UnknownAsrConvention(String),
    /// Override angle outside [0, 30] degrees.
    AngleOutOfRange { name: &'static str, value: f64 },
    /// Isha interval override outside [0, 240] minutes.
    IntervalOutOfRange(u32),
    /// Both an Isha angle and an Isha interval were given.
    ConflictingIshaOverride,
    /// Latitude outside [-90, 90].
    InvalidLatitude(f64),
    /// Longitude outside [-180, 180].
    InvalidLongitude(f64),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMethod(key) => write!(f, "unknown calculation method '{key}'"),
            Self::UnknownAsrConvention(key) => {
                write!(f, "unknown Asr convention '{key}' (expected standard or hanafi)")
            }
            Self::AngleOutOfRange { name, value } => {
                write!(f, "{name} {value} deg outside [0, 30]")
            }
            Self::IntervalOutOfRange(m) => write!(f, "Isha interval {m} min outside [0, 240]"),
            Self::ConflictingIshaOverride => {
                write!(f, "Isha angle and Isha interval are mutually exclusive")
            }
            Self::InvalidLatitude(v) => write!(f, "latitude {v} outside [-90, 90]"),
            Self::InvalidLongitude(v) => write!(f, "longitude {v} outside [-180, 180]"),
        }
    }
}

impl Error for ConfigError {}

/// Why sunrise/sunset does not exist on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolarCondition {
    /// Sun stays below the horizon all day (polar night).
    NeverRises,
    /// Sun stays above the horizon all day (midnight sun).
    NeverSets,
}

/// Errors from prayer-time computation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PrayerError {
    Config(ConfigError),
    Time(TimeError),
    Astro(AstroError),
    /// No sunrise or sunset, so neither the angle solve nor the
    /// night-fraction rule can place Fajr and Isha.
    Polar(PolarCondition),
}

impl Display for PrayerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Astro(e) => write!(f, "astronomy error: {e}"),
            Self::Polar(PolarCondition::NeverRises) => {
                write!(f, "the Sun does not rise on this date (polar night)")
            }
            Self::Polar(PolarCondition::NeverSets) => {
                write!(f, "the Sun does not set on this date (midnight sun)")
            }
        }
    }
}

impl Error for PrayerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Time(e) => Some(e),
            Self::Astro(e) => Some(e),
            Self::Polar(_) => None,
        }
    }
}

impl From<ConfigError> for PrayerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TimeError> for PrayerError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<AstroError> for PrayerError {
    fn from(e: AstroError) -> Self {
        Self::Astro(e)
    }
}

/// Errors from inferring angles out of observed times.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReverseError {
    /// Observed times are not ordered Fajr < sunrise < Maghrib < Isha.
    Sequence {
        fajr: f64,
        sunrise: f64,
        maghrib: f64,
        isha: f64,
    },
    /// Observed Fajr is not before solar noon.
    FajrAfterNoon { fajr: f64, noon: f64 },
    /// Offset from noon maps to an hour angle outside [0, 180] degrees.
    HourAngleOutOfRange { prayer: &'static str, hour_angle: f64 },
    /// The forward computation of the day failed.
    Prayer(PrayerError),
}

impl Display for ReverseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence {
                fajr,
                sunrise,
                maghrib,
                isha,
            } => write!(
                f,
                "times must satisfy Fajr < sunrise < Maghrib < Isha \
                 (got {fajr:.3}, computed sunrise {sunrise:.3}, {maghrib:.3}, {isha:.3} h)"
            ),
            Self::FajrAfterNoon { fajr, noon } => {
                write!(f, "Fajr {fajr:.3} h is not before solar noon {noon:.3} h")
            }
            Self::HourAngleOutOfRange { prayer, hour_angle } => {
                write!(f, "{prayer}: hour angle {hour_angle:.2} deg outside [0, 180]")
            }
            Self::Prayer(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ReverseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Prayer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrayerError> for ReverseError {
    fn from(e: PrayerError) -> Self {
        Self::Prayer(e)
    }
}

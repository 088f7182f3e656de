//! Location, event and result types for prayer-time computation.

use std::fmt::{Display, Formatter};

use salat_astro::SolarEphemeris;
use salat_time::{CalendarDate, HijriDate};

use crate::error::ConfigError;
use crate::method::MethodParams;
use crate::qibla::Qibla;

/// Absolute latitude beyond which Fajr and Isha always use the
/// night-fraction rule, degrees.
pub const HIGH_LATITUDE_THRESHOLD_DEG: f64 = 48.5;

/// Observer position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Elevation above the surrounding terrain in metres.
    pub elevation_m: f64,
}

impl Location {
    /// Create a location without range checks.
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        }
    }

    /// Create a location, rejecting out-of-range coordinates.
    pub fn validated(
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
    ) -> Result<Self, ConfigError> {
        let loc = Self::new(latitude_deg, longitude_deg, elevation_m);
        loc.validate()?;
        Ok(loc)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(ConfigError::InvalidLatitude(self.latitude_deg));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(ConfigError::InvalidLongitude(self.longitude_deg));
        }
        Ok(())
    }

    pub fn is_high_latitude(&self) -> bool {
        self.latitude_deg.abs() > HIGH_LATITUDE_THRESHOLD_DEG
    }
}

/// The six daily events, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All events in logical order.
    pub const ALL: [Prayer; 6] = [
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

impl Display for Prayer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A local clock time as fractional hours since local midnight.
///
/// Values below 0 or at/after 24 belong to the previous or next calendar
/// day; [`EventTime::clock`] reports that as a day offset.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventTime(f64);

/// An [`EventTime`] split into calendar-day offset and clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    /// -1, 0 or +1 relative to the requested date.
    pub day_offset: i32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl EventTime {
    pub const fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    pub const fn hours(self) -> f64 {
        self.0
    }

    /// Nearest whole minute; exactly 30 s rounds up.
    pub fn rounded(self) -> Self {
        Self((self.0 * 60.0 + 0.5).floor() / 60.0)
    }

    /// Minutes from `earlier` to `self`.
    pub fn minutes_since(self, earlier: Self) -> f64 {
        (self.0 - earlier.0) * 60.0
    }

    /// Clock fields at one-second resolution.
    pub fn clock(self) -> ClockTime {
        let total = (self.0 * 3600.0).round() as i64;
        let day_offset = total.div_euclid(86_400);
        let s = total.rem_euclid(86_400);
        ClockTime {
            day_offset: day_offset as i32,
            hour: (s / 3600) as u32,
            minute: (s % 3600 / 60) as u32,
            second: (s % 60) as u32,
        }
    }
}

impl Display for EventTime {
    /// `HH:MM` of the rounded time; `{:#}` prints `HH:MM:SS` unrounded.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let c = if f.alternate() {
            self.clock()
        } else {
            self.rounded().clock()
        };
        if f.alternate() {
            write!(f, "{:02}:{:02}:{:02}", c.hour, c.minute, c.second)?;
        } else {
            write!(f, "{:02}:{:02}", c.hour, c.minute)?;
        }
        if c.day_offset != 0 {
            write!(f, " ({:+}d)", c.day_offset)?;
        }
        Ok(())
    }
}

/// The six events of one day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerTimes {
    pub fajr: EventTime,
    pub sunrise: EventTime,
    pub dhuhr: EventTime,
    pub asr: EventTime,
    pub maghrib: EventTime,
    pub isha: EventTime,
}

impl PrayerTimes {
    pub fn get(&self, prayer: Prayer) -> EventTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Events in logical order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, EventTime)> + '_ {
        Prayer::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Every event rounded to the nearest minute.
    pub fn rounded(&self) -> Self {
        Self {
            fajr: self.fajr.rounded(),
            sunrise: self.sunrise.rounded(),
            dhuhr: self.dhuhr.rounded(),
            asr: self.asr.rounded(),
            maghrib: self.maghrib.rounded(),
            isha: self.isha.rounded(),
        }
    }

    /// Fajr < Sunrise < Dhuhr < Asr < Maghrib < Isha.
    pub fn is_strictly_ordered(&self) -> bool {
        let t: Vec<f64> = self.iter().map(|(_, e)| e.hours()).collect();
        t.windows(2).all(|w| w[0] < w[1])
    }
}

/// Why the night-fraction rule replaced an angle solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FallbackReason {
    /// Latitude beyond [`HIGH_LATITUDE_THRESHOLD_DEG`].
    HighLatitude,
    /// The Sun does not reach the required depression on this day.
    Unreachable,
}

/// How Fajr or Isha was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwilightRule {
    /// Solar depression angle solved directly.
    Angle,
    /// Fraction `angle/60` of the night from sunset to next sunrise.
    NightFraction(FallbackReason),
    /// Fixed minutes after Maghrib.
    FixedInterval(u32),
}

/// Full result for one location, date and method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerTimesResult {
    pub date: CalendarDate,
    /// Hours east of UTC that the times are expressed in.
    pub utc_offset_hours: f64,
    pub precise: PrayerTimes,
    pub rounded: PrayerTimes,
    /// Solar transit (before the Dhuhr safety offset).
    pub transit: EventTime,
    pub hijri: HijriDate,
    pub qibla: Qibla,
    /// Parameters actually used (after overrides).
    pub params: MethodParams,
    pub fajr_rule: TwilightRule,
    pub isha_rule: TwilightRule,
    /// Sun at the approximate local noon of the date.
    pub sun: SolarEphemeris,
}

impl PrayerTimesResult {
    /// Whether either twilight event used the night-fraction rule.
    pub fn used_night_fraction(&self) -> bool {
        matches!(self.fajr_rule, TwilightRule::NightFraction(_))
            || matches!(self.isha_rule, TwilightRule::NightFraction(_))
    }
}

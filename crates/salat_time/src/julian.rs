//! Julian Date ↔ calendar conversion.
//!
//! Dates on or after 1582-10-15 are Gregorian; earlier dates are read as
//! proleptic Julian calendar dates (no century correction), matching the
//! historical switch-over. Algorithm: Meeus, *Astronomical Algorithms*, ch. 7.

use crate::error::TimeError;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// First day of the Gregorian calendar.
const GREGORIAN_START: (i32, u32, u32) = (1582, 10, 15);

/// First Julian Day Number counted on the Gregorian calendar (1582-10-15).
const GREGORIAN_START_JDN: f64 = 2_299_161.0;

/// Convert a calendar date to a Julian Date.
///
/// `day_frac` carries the day of month plus any fraction of a day measured
/// from 0h UT, so `calendar_to_jd(2000, 1, 1.0)` is 2451544.5 and
/// `calendar_to_jd(2000, 1, 1.5)` is J2000.0.
///
/// Only the month is validated. A day fraction past the end of the month
/// rolls forward continuously, which makes day stepping trivial.
pub fn calendar_to_jd(year: i32, month: u32, day_frac: f64) -> Result<f64, TimeError> {
    if !(1..=12).contains(&month) {
        return Err(TimeError::InvalidMonth(month));
    }
    Ok(jd_unchecked(year, month, day_frac))
}

fn jd_unchecked(year: i32, month: u32, day_frac: f64) -> f64 {
    // January and February count as months 13 and 14 of the previous year.
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let b = if (year, month, day_frac.floor() as u32) >= GREGORIAN_START {
        let a = (f64::from(y) / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };

    (365.25 * (f64::from(y) + 4716.0)).floor()
        + (30.6001 * (f64::from(m) + 1.0)).floor()
        + day_frac
        + b
        - 1524.5
}

/// Convert a Julian Date to `(year, month, day_frac)`.
///
/// Inverse of [`calendar_to_jd`]: the fractional part of `day_frac` is the
/// fraction of the day elapsed since 0h UT.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;

    let a = if z < GREGORIAN_START_JDN {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;
    (year, month, day)
}

/// Gregorian leap-year rule.
pub fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, TimeError> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_gregorian_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(TimeError::InvalidMonth(month)),
    }
}

/// A civil calendar date (proleptic Gregorian after the 1582 reform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Create a date, rejecting out-of-range months and days.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        let last = days_in_month(year, month)?;
        if day == 0 || day > last {
            return Err(TimeError::InvalidDay(day));
        }
        Ok(Self { year, month, day })
    }

    /// Julian Date at 0h UT of this date.
    pub fn to_jd(self) -> f64 {
        self.jd_at(0.0, 0.0)
    }

    /// Julian Date of a local clock time on this date.
    ///
    /// `local_hours` is the time of day in hours, `utc_offset_hours` the zone
    /// offset east of Greenwich (e.g. -5.0 for US Eastern Standard Time).
    pub fn jd_at(self, local_hours: f64, utc_offset_hours: f64) -> f64 {
        let day_frac = f64::from(self.day) + (local_hours - utc_offset_hours) / 24.0;
        jd_unchecked(self.year, self.month, day_frac)
    }

    /// The following calendar day.
    pub fn succ(self) -> Self {
        let last = days_in_month(self.year, self.month).unwrap_or(31);
        if self.day < last {
            Self {
                day: self.day + 1,
                ..self
            }
        } else if self.month < 12 {
            Self {
                month: self.month + 1,
                day: 1,
                ..self
            }
        } else {
            Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            }
        }
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = String;

    /// Parse `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [y, m, d] = parts.as_slice() else {
            return Err(format!("invalid date '{s}', expected YYYY-MM-DD"));
        };
        let year = y
            .parse::<i32>()
            .map_err(|e| format!("invalid year '{y}': {e}"))?;
        let month = m
            .parse::<u32>()
            .map_err(|e| format!("invalid month '{m}': {e}"))?;
        let day = d
            .parse::<u32>()
            .map_err(|e| format!("invalid day '{d}': {e}"))?;
        Self::new(year, month, day).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_midnight() {
        let jd = calendar_to_jd(2000, 1, 1.0).unwrap();
        assert_eq!(jd, 2_451_544.5);
    }

    #[test]
    fn j2000_noon_is_epoch() {
        let jd = calendar_to_jd(2000, 1, 1.5).unwrap();
        assert!((jd - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn unix_epoch() {
        assert_eq!(calendar_to_jd(1970, 1, 1.0).unwrap(), 2_440_587.5);
    }

    #[test]
    fn century_january_uses_adjusted_year() {
        // 1900 is not a Gregorian leap year; the century term must come from
        // the shifted year 1899.
        assert_eq!(calendar_to_jd(1900, 1, 1.0).unwrap(), 2_415_020.5);
        assert_eq!(calendar_to_jd(1900, 3, 1.0).unwrap(), 2_415_079.5);
    }

    #[test]
    fn gregorian_switch_is_contiguous() {
        let last_julian = calendar_to_jd(1582, 10, 4.0).unwrap();
        let first_gregorian = calendar_to_jd(1582, 10, 15.0).unwrap();
        assert_eq!(first_gregorian - last_julian, 1.0);
    }

    #[test]
    fn month_zero_rejected() {
        assert_eq!(calendar_to_jd(2024, 0, 1.0), Err(TimeError::InvalidMonth(0)));
        assert_eq!(calendar_to_jd(2024, 13, 1.0), Err(TimeError::InvalidMonth(13)));
    }

    #[test]
    fn february_leap_span() {
        let feb = calendar_to_jd(2024, 2, 1.0).unwrap();
        let mar = calendar_to_jd(2024, 3, 1.0).unwrap();
        assert_eq!(mar - feb, 29.0);
    }

    #[test]
    fn jd_to_calendar_j2000() {
        let (y, m, d) = jd_to_calendar(J2000_JD);
        assert_eq!((y, m), (2000, 1));
        assert!((d - 1.5).abs() < 1e-9, "day = {d}");
    }

    #[test]
    fn jd_to_calendar_before_reform() {
        let (y, m, d) = jd_to_calendar(2_299_159.5);
        assert_eq!((y, m, d.floor() as u32), (1582, 10, 4));
    }

    #[test]
    fn date_rejects_bad_day() {
        assert_eq!(CalendarDate::new(2023, 2, 29), Err(TimeError::InvalidDay(29)));
        assert!(CalendarDate::new(2024, 2, 29).is_ok());
        assert_eq!(CalendarDate::new(2024, 4, 0), Err(TimeError::InvalidDay(0)));
    }

    #[test]
    fn jd_at_applies_offset() {
        let date = CalendarDate::new(2025, 1, 1).unwrap();
        // 07:00 in UTC-5 is 12:00 UT.
        let jd = date.jd_at(7.0, -5.0);
        assert!((jd - (date.to_jd() + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn succ_rolls_over_year() {
        let d = CalendarDate::new(2024, 12, 31).unwrap().succ();
        assert_eq!(d, CalendarDate::new(2025, 1, 1).unwrap());
        let d = CalendarDate::new(2024, 2, 28).unwrap().succ();
        assert_eq!(d, CalendarDate::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn parse_and_display() {
        let d: CalendarDate = "2025-03-10".parse().unwrap();
        assert_eq!(d.to_string(), "2025-03-10");
        assert!("2025-3".parse::<CalendarDate>().is_err());
        assert!("2025-13-01".parse::<CalendarDate>().is_err());
    }
}

//! Tabular Hijri calendar.
//!
//! The arithmetic (civil) Islamic calendar repeats every 30 lunar years:
//! 19 common years of 354 days and 11 leap years of 355 days, 10631 days in
//! all. Leap years fall at positions 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and
//! 29 of each cycle, and the leap day is appended to Dhu al-Hijjah.
//!
//! This is a deterministic approximation. It carries a day correction so
//! callers can align it with a locally announced (sighted) calendar.

use crate::error::TimeError;

/// Julian Day Number of 1 Muharram 1 AH (16 July 622, Julian calendar).
pub const HIJRI_EPOCH_JD: i64 = 1_948_440;

/// Days in one 30-year intercalation cycle.
pub const CYCLE_DAYS: i64 = 10_631;

/// The twelve Hijri months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HijriMonth {
    Muharram,
    Safar,
    RabiAlAwwal,
    RabiAlThani,
    JumadaAlUla,
    JumadaAlThani,
    Rajab,
    Shaban,
    Ramadan,
    Shawwal,
    DhuAlQadah,
    DhuAlHijjah,
}

/// All 12 months in calendar order (index 0 = Muharram).
pub const ALL_HIJRI_MONTHS: [HijriMonth; 12] = [
    HijriMonth::Muharram,
    HijriMonth::Safar,
    HijriMonth::RabiAlAwwal,
    HijriMonth::RabiAlThani,
    HijriMonth::JumadaAlUla,
    HijriMonth::JumadaAlThani,
    HijriMonth::Rajab,
    HijriMonth::Shaban,
    HijriMonth::Ramadan,
    HijriMonth::Shawwal,
    HijriMonth::DhuAlQadah,
    HijriMonth::DhuAlHijjah,
];

impl HijriMonth {
    /// Month from its 1-based number.
    pub fn from_number(month: u32) -> Result<Self, TimeError> {
        month
            .checked_sub(1)
            .and_then(|i| ALL_HIJRI_MONTHS.get(i as usize))
            .copied()
            .ok_or(TimeError::InvalidHijriMonth(month))
    }

    /// 1-based month number.
    pub const fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Transliterated English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Muharram => "Muharram",
            Self::Safar => "Safar",
            Self::RabiAlAwwal => "Rabi al-Awwal",
            Self::RabiAlThani => "Rabi al-Thani",
            Self::JumadaAlUla => "Jumada al-Ula",
            Self::JumadaAlThani => "Jumada al-Thani",
            Self::Rajab => "Rajab",
            Self::Shaban => "Sha'ban",
            Self::Ramadan => "Ramadan",
            Self::Shawwal => "Shawwal",
            Self::DhuAlQadah => "Dhu al-Qa'dah",
            Self::DhuAlHijjah => "Dhu al-Hijjah",
        }
    }

    /// Arabic name.
    pub const fn arabic_name(self) -> &'static str {
        match self {
            Self::Muharram => "مُحَرَّم",
            Self::Safar => "صَفَر",
            Self::RabiAlAwwal => "رَبِيع الأَوَّل",
            Self::RabiAlThani => "رَبِيع الثَّانِي",
            Self::JumadaAlUla => "جُمَادَى الأُولَى",
            Self::JumadaAlThani => "جُمَادَى الثَّانِيَة",
            Self::Rajab => "رَجَب",
            Self::Shaban => "شَعْبَان",
            Self::Ramadan => "رَمَضَان",
            Self::Shawwal => "شَوَّال",
            Self::DhuAlQadah => "ذُو القَعْدَة",
            Self::DhuAlHijjah => "ذُو الحِجَّة",
        }
    }
}

/// A date in the tabular Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HijriDate {
    /// Year AH (field order gives chronological `Ord`).
    pub year: i64,
    /// Month, 1..=12.
    pub month: u32,
    /// Day of month, 1..=30.
    pub day: u32,
}

impl HijriDate {
    pub fn new(year: i64, month: u32, day: u32) -> Result<Self, TimeError> {
        let last = days_in_hijri_month(year, month)?;
        if day == 0 || day > last {
            return Err(TimeError::InvalidDay(day));
        }
        Ok(Self { year, month, day })
    }

    /// The month as an enum.
    pub fn hijri_month(&self) -> Result<HijriMonth, TimeError> {
        HijriMonth::from_number(self.month)
    }

    pub fn is_ramadan(&self) -> bool {
        self.month == HijriMonth::Ramadan.number()
    }
}

impl std::fmt::Display for HijriDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.hijri_month() {
            Ok(m) => write!(f, "{} {} {} AH", self.day, m.name(), self.year),
            Err(_) => write!(f, "{}/{}/{} AH", self.day, self.month, self.year),
        }
    }
}

/// Leap-year predicate: a 30-day Dhu al-Hijjah.
pub fn is_hijri_leap_year(year: i64) -> bool {
    (11 * year + 14).rem_euclid(30) < 11
}

/// Days in a Hijri month: odd months 30, even months 29, and a 30th day of
/// Dhu al-Hijjah in leap years.
pub fn days_in_hijri_month(year: i64, month: u32) -> Result<u32, TimeError> {
    match month {
        12 if is_hijri_leap_year(year) => Ok(30),
        1..=12 if month % 2 == 1 => Ok(30),
        1..=12 => Ok(29),
        _ => Err(TimeError::InvalidHijriMonth(month)),
    }
}

/// Convert a Julian Date to the tabular Hijri date of that civil day.
///
/// `jd` is reduced to its civil Julian Day Number (`floor(jd + 0.5)`), so any
/// instant between 0h and 24h UT of a Gregorian day maps to the same Hijri
/// day. `correction` shifts the result by whole days.
pub fn jd_to_hijri(jd: f64, correction: i32) -> HijriDate {
    let jdn = (jd + 0.5).floor() as i64 + i64::from(correction);

    let l = jdn - HIJRI_EPOCH_JD + 10_632;
    // Completed 30-year cycles.
    let n = (l - 1).div_euclid(CYCLE_DAYS);
    let l = l - CYCLE_DAYS * n + 354;
    // Year within the cycle.
    let j = (10_985 - l).div_euclid(5_316) * (50 * l).div_euclid(17_719)
        + l.div_euclid(5_670) * (43 * l).div_euclid(15_238);
    let l = l
        - (30 - j).div_euclid(15) * (17_719 * j).div_euclid(50)
        - j.div_euclid(16) * (15_238 * j).div_euclid(43)
        + 29;
    let month = (24 * l).div_euclid(709);
    let day = l - (709 * month).div_euclid(24);
    let year = 30 * n + j - 30;

    HijriDate {
        year,
        month: month as u32,
        day: day as u32,
    }
}

/// Convert a Hijri date back to the Julian Date at 0h UT of that civil day.
pub fn hijri_to_jd(date: HijriDate) -> Result<f64, TimeError> {
    let HijriDate { year, month, day } = date;
    let last = days_in_hijri_month(year, month)?;
    if day == 0 || day > last {
        return Err(TimeError::InvalidDay(day));
    }
    let m = i64::from(month);
    let jdn = (11 * year + 3).div_euclid(30) + 354 * year + 30 * m - (m - 1).div_euclid(2)
        + i64::from(day)
        + HIJRI_EPOCH_JD
        - 385;
    Ok(jdn as f64 - 0.5)
}

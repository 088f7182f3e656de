//! Calendar conversions for prayer-time computation.
//!
//! This crate provides:
//! - Gregorian/Julian calendar ↔ Julian Date conversion
//! - A `CalendarDate` value type with optional local time and UTC offset
//! - Tabular (30-year cycle) Hijri calendar conversion and its inverse

pub mod error;
pub mod hijri;
pub mod julian;

pub use error::TimeError;
pub use hijri::{
    ALL_HIJRI_MONTHS, CYCLE_DAYS, HIJRI_EPOCH_JD, HijriDate, HijriMonth, days_in_hijri_month,
    hijri_to_jd, is_hijri_leap_year, jd_to_hijri,
};
pub use julian::{
    CalendarDate, J2000_JD, calendar_to_jd, days_in_month, is_gregorian_leap_year,
    jd_to_calendar,
};

//! Error types for calendar conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from Gregorian or Hijri date handling.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Gregorian month outside 1..=12.
    InvalidMonth(u32),
    /// Day outside the valid range for its month.
    InvalidDay(u32),
    /// Hijri month outside 1..=12.
    InvalidHijriMonth(u32),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(m) => write!(f, "invalid month {m} (must be 1-12)"),
            Self::InvalidDay(d) => write!(f, "invalid day {d} for the given month"),
            Self::InvalidHijriMonth(m) => write!(f, "invalid Hijri month {m} (must be 1-12)"),
        }
    }
}

impl Error for TimeError {}

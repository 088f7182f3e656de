//! Error types for degree trigonometry and hour-angle solving.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from the trigonometric layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum AstroError {
    /// Inverse sine/cosine argument outside [-1, 1].
    ///
    /// For the hour-angle solver this means the Sun never reaches the
    /// requested altitude on that day at that latitude.
    Domain { function: &'static str, value: f64 },
    /// Cotangent evaluated at a multiple of 180°.
    DivisionByZero {
        function: &'static str,
        angle_deg: f64,
    },
}

impl Display for AstroError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain { function, value } => {
                write!(f, "{function}: argument {value} outside [-1, 1]")
            }
            Self::DivisionByZero {
                function,
                angle_deg,
            } => write!(f, "{function}: undefined at {angle_deg} deg"),
        }
    }
}

impl Error for AstroError {}

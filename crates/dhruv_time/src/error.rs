//! Error types for calendar and time conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar validation or time conversion.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar fields do not form a valid Gregorian date.
    InvalidDate(&'static str),
    /// A date string could not be parsed.
    Parse(String),
    /// Julian Date is NaN or infinite.
    NonFiniteJd,
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::Parse(msg) => write!(f, "date parse error: {msg}"),
            Self::NonFiniteJd => write!(f, "julian date must be finite"),
        }
    }
}

impl Error for TimeError {}

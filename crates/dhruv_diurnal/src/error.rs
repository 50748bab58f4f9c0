//! Error types for the diurnal search.

use std::error::Error;
use std::fmt::{Display, Formatter};

use dhruv_core::EngineError;
use dhruv_time::TimeError;

/// Errors from transit/rise/set resolution.
///
/// Circumpolar days and missing transits are not errors; they surface as
/// [`DiurnalOccurrence::Absent`](crate::DiurnalOccurrence::Absent).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DiurnalError {
    /// Error from the ephemeris service, passed through unchanged.
    Engine(EngineError),
    /// Error from calendar conversion.
    Time(TimeError),
    /// Latitude or longitude out of range or not finite.
    InvalidLocation(&'static str),
    /// Empty phase set, bad precision or bad search configuration.
    InvalidRequest(&'static str),
    /// Transit fixed-point iteration exceeded its cap.
    NoConvergence(&'static str),
    /// A day offset outside the five-day sample window was addressed.
    OutsideWindow { offset: i32 },
}

impl Display for DiurnalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(e) => write!(f, "engine error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            Self::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            Self::NoConvergence(msg) => write!(f, "no convergence: {msg}"),
            Self::OutsideWindow { offset } => {
                write!(f, "day offset {offset} outside the sample window")
            }
        }
    }
}

impl Error for DiurnalError {}

impl From<EngineError> for DiurnalError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<TimeError> for DiurnalError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

//! Civil calendar dates and UTC instants.
//!
//! `CivilDate` is the base date of a diurnal request; `UtcTime` is used
//! for presenting computed instants. Both sit on top of [`crate::julian`].
//! No leap-second or ΔT handling is applied: Julian Dates here are on a
//! single uniform scale.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_calendar};

/// A Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            if leap { 29 } else { 28 }
        }
    }
}

impl CivilDate {
    /// Create a validated calendar date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate("month must be in 1..=12"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        Ok(Self { year, month, day })
    }

    /// Julian Date at 0h of this date.
    pub fn jd_midnight(&self) -> f64 {
        calendar_to_jd(self.year, self.month, self.day as f64)
    }

    /// The date `days` after this one (negative goes back).
    pub fn add_days(&self, days: i64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(self.jd_midnight() + days as f64);
        Self {
            year,
            month,
            day: day_frac.round() as u32,
        }
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let mut field = |name: &str| {
            parts
                .next()
                .ok_or_else(|| TimeError::Parse(format!("missing {name} in '{s}'")))
        };
        let year = field("year")?;
        let month = field("month")?;
        let day = field("day")?;
        let year: i32 = year
            .parse()
            .map_err(|_| TimeError::Parse(format!("bad year in '{s}'")))?;
        let month: u32 = month
            .parse()
            .map_err(|_| TimeError::Parse(format!("bad month in '{s}'")))?;
        let day: u32 = day
            .parse()
            .map_err(|_| TimeError::Parse(format!("bad day in '{s}'")))?;
        Self::new(year, month, day)
    }
}

/// Approximate local mean noon (JD) from the 0h Julian Date of a date and
/// the observer's east longitude in degrees.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_midnight: f64, longitude_east_deg: f64) -> f64 {
    jd_midnight + 0.5 - longitude_east_deg / 360.0
}

/// UTC calendar instant with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Julian Date of this instant.
    pub fn to_jd(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Calendar instant from a Julian Date.
    pub fn from_jd(jd: f64) -> Result<Self, TimeError> {
        if !jd.is_finite() {
            return Err(TimeError::NonFiniteJd);
        }
        let (year, month, day_frac) = jd_to_calendar(jd);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * 86_400.0;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// The calendar date part.
    pub fn date(&self) -> CivilDate {
        CivilDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }
}

impl Display for UtcTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

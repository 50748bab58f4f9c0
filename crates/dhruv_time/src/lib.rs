//! Calendar and sidereal-time support for the diurnal engine.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - `CivilDate` / `UtcTime` value types
//! - Earth Rotation Angle, mean and apparent sidereal time
//!
//! All instants are plain `f64` Julian Dates on a single uniform scale.

pub mod civil;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use civil::{CivilDate, UtcTime, approximate_local_noon_jd};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, jd_to_centuries,
};
pub use sidereal::{
    SIDEREAL_RATE, apparent_sidereal_time_rad, earth_rotation_angle_rad,
    equation_of_equinoxes_rad, gmst_rad, local_sidereal_time_rad,
};

//! Nutation, obliquity and coordinate helpers for the diurnal engine.
//!
//! Provides the truncated IAU 2000B nutation series, mean/true obliquity,
//! the ecliptic → equatorial rotation and a few horizon formulas.

pub mod angle;
pub mod equatorial;
pub mod nutation;
pub mod obliquity;

pub use angle::{ARCMIN_TO_RAD, ARCSEC_TO_RAD, normalize_rad, normalize_signed_rad};
pub use equatorial::{
    EquatorialCoords, altitude_rad, ecliptic_to_equatorial, horizon_hour_angle_cos,
};
pub use nutation::{Nutation, fundamental_arguments, nutation};
pub use obliquity::{OBLIQUITY_J2000_ARCSEC, mean_obliquity_rad, true_obliquity_rad};

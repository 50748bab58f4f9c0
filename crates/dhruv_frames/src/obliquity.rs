//! Mean and true obliquity of the ecliptic.
//!
//! Mean obliquity: IAU 2006 (Hilton et al. 2006), arcseconds polynomial in
//! Julian centuries since J2000.0.

use crate::angle::ARCSEC_TO_RAD;

/// Mean obliquity of the ecliptic at J2000.0, arcseconds.
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.406;

/// Mean obliquity of date, radians.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    let arcsec = OBLIQUITY_J2000_ARCSEC
        + t * (-46.836769 + t * (-0.0001831 + t * (0.00200340 + t * (-0.000000576 - t * 4.34e-8))));
    arcsec * ARCSEC_TO_RAD
}

/// True obliquity of date: mean obliquity plus nutation in obliquity.
pub fn true_obliquity_rad(t: f64, deps_rad: f64) -> f64 {
    mean_obliquity_rad(t) + deps_rad
}

//! Angle normalisation helpers.

use std::f64::consts::{PI, TAU};

/// Arcseconds to radians.
pub const ARCSEC_TO_RAD: f64 = PI / 648_000.0;

/// Arcminutes to radians.
pub const ARCMIN_TO_RAD: f64 = PI / 10_800.0;

/// Normalise to [0, 2π).
pub fn normalize_rad(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Normalise to [-π, π).
pub fn normalize_signed_rad(angle: f64) -> f64 {
    let a = normalize_rad(angle + PI) - PI;
    if a >= PI { a - TAU } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_range() {
        assert_eq!(normalize_rad(0.0), 0.0);
        assert!((normalize_rad(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert!((normalize_rad(7.0) - (7.0 - TAU)).abs() < 1e-12);
        assert!(normalize_rad(-1e-20) < TAU);
    }

    #[test]
    fn signed_range() {
        assert!((normalize_signed_rad(3.5) - (3.5 - TAU)).abs() < 1e-12);
        assert!((normalize_signed_rad(-3.5) - (TAU - 3.5)).abs() < 1e-12);
        assert!((normalize_signed_rad(0.25) - 0.25).abs() < 1e-12);
        let edge = normalize_signed_rad(PI);
        assert!((-PI..PI).contains(&edge), "edge = {edge}");
    }

    #[test]
    fn arc_units() {
        assert!((ARCSEC_TO_RAD * 3600.0 - 1.0_f64.to_radians()).abs() < 1e-15);
        assert!((ARCMIN_TO_RAD * 60.0 - 1.0_f64.to_radians()).abs() < 1e-15);
    }
}

//! Earth Rotation Angle, mean and apparent sidereal time.
//!
//! The diurnal engine evaluates sidereal time at arbitrary fractional-day
//! offsets, so everything here is closed-form and cheap. Apparent
//! sidereal time needs nutation in longitude and the true obliquity;
//! callers supply those (usually interpolated from daily samples).
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.
//! - Equation of the equinoxes: Δψ·cos ε (IAU 1982 form, without the
//!   small complementary terms).

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

/// Arcseconds to radians.
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Sidereal rotation rate of the Earth, revolutions per UT1 day.
pub const SIDEREAL_RATE: f64 = 1.002_737_811_911_354_6;

/// Earth Rotation Angle at a Julian Date (UT1), radians in [0, 2π).
pub fn earth_rotation_angle_rad(jd: f64) -> f64 {
    let du = jd - J2000_JD;
    // Split the integer turns off first: 1.0027…·du loses bits for large du.
    let frac = (0.779_057_273_264_0 + (SIDEREAL_RATE - 1.0) * du + du.fract()).rem_euclid(1.0);
    TAU * frac
}

/// Greenwich Mean Sidereal Time at a Julian Date (UT1), radians in [0, 2π).
///
/// GMST = ERA + (0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
/// − 0.000029956·T⁴ − 0.0000000368·T⁵)″
pub fn gmst_rad(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / DAYS_PER_CENTURY;
    let poly_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 - t * 0.0000000368))));
    (earth_rotation_angle_rad(jd) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Equation of the equinoxes, radians: `Δψ · cos ε`.
pub fn equation_of_equinoxes_rad(nutation_lon_rad: f64, true_obliquity_rad: f64) -> f64 {
    nutation_lon_rad * true_obliquity_rad.cos()
}

/// Greenwich Apparent Sidereal Time, radians in [0, 2π).
pub fn apparent_sidereal_time_rad(jd: f64, nutation_lon_rad: f64, true_obliquity_rad: f64) -> f64 {
    (gmst_rad(jd) + equation_of_equinoxes_rad(nutation_lon_rad, true_obliquity_rad))
        .rem_euclid(TAU)
}

/// Local sidereal time from Greenwich sidereal time and east longitude.
pub fn local_sidereal_time_rad(gst: f64, longitude_east_rad: f64) -> f64 {
    (gst + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000_noon() {
        let theta_deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!((theta_deg - 280.46).abs() < 0.1, "ERA = {theta_deg}");
    }

    #[test]
    fn gmst_meeus_example_12a() {
        // 1987-04-10 0h UT: GMST = 13h10m46.3668s = 197.693195°
        let gmst_deg = gmst_rad(2_446_895.5).to_degrees();
        assert!((gmst_deg - 197.693195).abs() < 1e-3, "GMST = {gmst_deg}");
    }

    #[test]
    fn gmst_advances_about_one_degree_per_day() {
        let g1 = gmst_rad(2_460_000.5);
        let g2 = gmst_rad(2_460_001.5);
        let step = (g2 - g1).rem_euclid(TAU).to_degrees();
        assert!((step - 0.9856).abs() < 1e-3, "daily step = {step}");
    }

    #[test]
    fn apparent_differs_by_equation_of_equinoxes() {
        let jd = 2_446_895.5;
        // Meeus 12.b: Δψ = -3.788″, ε = 23°26′36.85″
        let dpsi = -3.788 * ARCSEC_TO_RAD;
        let eps = (23.0 + 26.0 / 60.0 + 36.85 / 3600.0_f64).to_radians();
        let diff = apparent_sidereal_time_rad(jd, dpsi, eps) - gmst_rad(jd);
        // -0.2317 s of time
        let diff_s = diff.to_degrees() * 240.0;
        assert!((diff_s + 0.2317).abs() < 1e-3, "EqE = {diff_s} s");
    }

    #[test]
    fn lst_wraps_east_offset() {
        let lst = local_sidereal_time_rad(6.0, PI / 2.0);
        assert!((lst - (6.0 + PI / 2.0 - TAU)).abs() < 1e-12);
    }

    #[test]
    fn ranges() {
        for &jd in &[2_451_545.0, 2_451_544.5, 2_460_000.5, 2_440_000.5] {
            assert!((0.0..TAU).contains(&earth_rotation_angle_rad(jd)));
            assert!((0.0..TAU).contains(&gmst_rad(jd)));
        }
    }
}

//! Ecliptic ↔ equatorial coordinate rotation and horizon geometry.

use crate::angle::normalize_rad;

/// Equatorial coordinates, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    /// Right ascension in [0, 2π).
    pub ra_rad: f64,
    /// Declination in [-π/2, π/2].
    pub dec_rad: f64,
}

/// Rotate ecliptic longitude/latitude of date into right ascension and
/// declination using obliquity `eps`.
pub fn ecliptic_to_equatorial(lon_rad: f64, lat_rad: f64, eps_rad: f64) -> EquatorialCoords {
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_eps, cos_eps) = eps_rad.sin_cos();

    let ra = (sin_lon * cos_eps - lat_rad.tan() * sin_eps).atan2(cos_lon);
    let dec = (sin_lat * cos_eps + cos_lat * sin_eps * sin_lon).clamp(-1.0, 1.0).asin();
    EquatorialCoords {
        ra_rad: normalize_rad(ra),
        dec_rad: dec,
    }
}

/// Geometric altitude of a body from observer latitude, declination and
/// local hour angle (all radians).
pub fn altitude_rad(latitude_rad: f64, dec_rad: f64, hour_angle_rad: f64) -> f64 {
    let s = latitude_rad.sin() * dec_rad.sin()
        + latitude_rad.cos() * dec_rad.cos() * hour_angle_rad.cos();
    s.clamp(-1.0, 1.0).asin()
}

/// Cosine of the hour angle at which a body of declination `dec_rad`
/// reaches altitude `h0_rad` for an observer at `latitude_rad`.
///
/// `cos H0 = (sin h0 − sin φ sin δ) / (cos φ cos δ)`
///
/// Values below −1 mean the body stays above `h0` all day; values above
/// +1 mean it never reaches `h0`. The result is not clamped.
pub fn horizon_hour_angle_cos(latitude_rad: f64, dec_rad: f64, h0_rad: f64) -> f64 {
    (h0_rad.sin() - latitude_rad.sin() * dec_rad.sin()) / (latitude_rad.cos() * dec_rad.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_13a() {
        // Pollux: λ = 113.215630°, β = 6.684170°, ε = 23.4392911°
        // → α = 116.328942°, δ = 28.026183°
        let eq = ecliptic_to_equatorial(
            113.215630_f64.to_radians(),
            6.684170_f64.to_radians(),
            23.4392911_f64.to_radians(),
        );
        assert!((eq.ra_rad.to_degrees() - 116.328942).abs() < 1e-5);
        assert!((eq.dec_rad.to_degrees() - 28.026183).abs() < 1e-5);
    }

    #[test]
    fn altitude_at_transit() {
        let phi = 45.0_f64.to_radians();
        let dec = 20.0_f64.to_radians();
        let alt = altitude_rad(phi, dec, 0.0).to_degrees();
        assert!((alt - 65.0).abs() < 1e-9, "alt = {alt}");
    }

    #[test]
    fn horizon_cos_sign_convention() {
        let h0 = (-50.0_f64 / 60.0).to_radians();
        let phi = 70.0_f64.to_radians();
        // Midsummer: never sets
        assert!(horizon_hour_angle_cos(phi, 23.44_f64.to_radians(), h0) < -1.0);
        // Midwinter: never rises
        assert!(horizon_hour_angle_cos(phi, (-23.44_f64).to_radians(), h0) > 1.0);
        // Equator at equinox: just over 90°
        let c = horizon_hour_angle_cos(0.0, 0.0, h0);
        assert!((c - h0.sin()).abs() < 1e-15);
    }
}

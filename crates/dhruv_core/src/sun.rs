//! Low-precision geocentric solar theory.
//!
//! Mean longitude and anomaly with a three-term equation of centre
//! (Meeus, *Astronomical Algorithms*, ch. 25). Accuracy ~0.01°, ample for
//! rise/set work.

use dhruv_frames::normalize_rad;

/// Geometric ecliptic position of the Sun, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// True geometric longitude, radians [0, 2π).
    pub lon_rad: f64,
    /// Earth–Sun distance, AU.
    pub distance_au: f64,
}

/// Solar position at `t` Julian centuries since J2000.0.
pub fn solar_position(t: f64) -> SolarPosition {
    let l0 = 280.46646 + t * (36000.76983 + t * 0.0003032);
    let m = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();
    let e = 0.016708634 - t * (0.000042037 + t * 0.0000001267);

    let c = (1.914602 - t * (0.004817 + t * 0.000014)) * m.sin()
        + (0.019993 - t * 0.000101) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let true_anomaly = m + c.to_radians();
    let distance_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    SolarPosition {
        lon_rad: normalize_rad((l0 + c).to_radians()),
        distance_au,
    }
}

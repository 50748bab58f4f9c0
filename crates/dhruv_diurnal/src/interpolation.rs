//! Finite-difference interpolation through equally spaced samples.
//!
//! Forward interpolation uses the 3-point and 5-point formulas of Meeus,
//! *Astronomical Algorithms*, ch. 3, with the interpolating factor `n`
//! measured in sample spacings from the central sample. Inverse
//! interpolation solves the 3-point parabola for its zero crossing.

use std::f64::consts::{PI, TAU};

/// Equally spaced samples centred on the middle element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Samples {
    Three([f64; 3]),
    Five([f64; 5]),
}

impl Samples {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Three(y) => y,
            Self::Five(y) => y,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            Self::Three(y) => y,
            Self::Five(y) => y,
        }
    }

    /// Value at `n` spacings from the central sample. `n = 0` returns the
    /// central sample bit-for-bit.
    pub fn interpolate(&self, n: f64) -> f64 {
        match self {
            Self::Three(y) => interpolate3(y, n),
            Self::Five(y) => interpolate5(y, n),
        }
    }

    /// Remove 2π jumps from a cyclic quantity that advances in `direction`
    /// (+1 increasing, −1 decreasing).
    ///
    /// Whenever a sample moved by more than half a cycle against the
    /// direction of motion, a full cycle is added to it and to every later
    /// sample. The result is re-anchored so the central sample keeps its
    /// stored value exactly.
    pub fn unwrap_cyclic(&mut self, direction: f64) {
        let y = self.as_mut_slice();
        let mid = y.len() / 2;

        let mut cycles = [0i32; 5];
        let mut running = 0i32;
        for i in 1..y.len() {
            let step = y[i] - y[i - 1];
            if direction > 0.0 && step < -PI {
                running += 1;
            } else if direction < 0.0 && step > PI {
                running -= 1;
            }
            cycles[i] = running;
        }

        let anchor = cycles[mid];
        for (value, k) in y.iter_mut().zip(cycles) {
            let shift = k - anchor;
            if shift != 0 {
                *value += f64::from(shift) * TAU;
            }
        }
    }
}

/// Meeus eq. 3.3.
pub fn interpolate3(y: &[f64; 3], n: f64) -> f64 {
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = b - a;
    y[1] + n / 2.0 * (a + b + n * c)
}

/// Meeus eq. 3.8.
pub fn interpolate5(y: &[f64; 5], n: f64) -> f64 {
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = y[3] - y[2];
    let d = y[4] - y[3];

    let e = b - a;
    let f = c - b;
    let g = d - c;

    let h = f - e;
    let j = g - f;

    let k = j - h;

    let n2 = n * n;
    y[2] + n / 2.0 * (b + c) + n2 / 2.0 * f + n * (n2 - 1.0) / 12.0 * (h + j)
        + n2 * (n2 - 1.0) / 24.0 * k
}

/// Both real zeros of the 3-point interpolating parabola, in spacings from
/// the central sample. Degenerate (linear) fits report the single root
/// twice; `None` when the fit has no real zero.
pub fn inverse_interpolate3_roots(y: &[f64; 3]) -> Option<(f64, f64)> {
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = b - a;

    // (c/2)·n² + ((a+b)/2)·n + y2 = 0
    let qa = c / 2.0;
    let qb = (a + b) / 2.0;
    let qc = y[1];

    let scale = y.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if qa.abs() <= scale * 1e-14 {
        if qb == 0.0 {
            return if qc == 0.0 { Some((0.0, 0.0)) } else { None };
        }
        let n = -qc / qb;
        return Some((n, n));
    }

    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return None;
    }
    let q = -0.5 * (qb + qb.signum() * disc.sqrt());
    if q == 0.0 {
        return Some((0.0, 0.0));
    }
    let r1 = q / qa;
    let r2 = qc / q;
    Some(if r1 <= r2 { (r1, r2) } else { (r2, r1) })
}

/// Zero of the 3-point parabola nearest the central sample.
pub fn inverse_interpolate3(y: &[f64; 3]) -> Option<f64> {
    let (r1, r2) = inverse_interpolate3_roots(y)?;
    Some(if r1.abs() <= r2.abs() { r1 } else { r2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_3a() {
        // Moon distance, 1992-11-07/08/09 0h; at 8d 4h21m: 0.876125 AU
        let y = [0.884226, 0.877366, 0.870531];
        let v = interpolate3(&y, 0.18125);
        assert!((v - 0.876125).abs() < 1e-6);
    }

    #[test]
    fn meeus_example_3b() {
        // Declination in arcseconds on three consecutive days; zero at n = −0.20127
        let n = inverse_interpolate3(&[-1693.4, 406.3, 2303.2]).unwrap();
        assert!((n + 0.20127).abs() < 1e-4, "n = {n}");
    }

    #[test]
    fn five_point_reproduces_quartic() {
        let f = |x: f64| 0.3 * x.powi(4) - x.powi(3) + 2.0 * x * x - 0.5 * x + 7.0;
        let y = [f(-2.0), f(-1.0), f(0.0), f(1.0), f(2.0)];
        for &n in &[-1.7, -0.4, 0.0, 0.25, 1.3] {
            assert!((interpolate5(&y, n) - f(n)).abs() < 1e-10);
        }
    }

    #[test]
    fn zero_offset_returns_centre_exactly() {
        let three = Samples::Three([0.1, 0.123_456_789, 0.2]);
        assert_eq!(three.interpolate(0.0), 0.123_456_789);
        let five = Samples::Five([1.0, 2.0, 3.141_592_7, 4.0, 5.5]);
        assert_eq!(five.interpolate(0.0), 3.141_592_7);
    }

    #[test]
    fn unwrap_increasing_across_zero() {
        let mut s = Samples::Five([6.0, 6.2, 0.1, 0.3, 0.5]);
        s.unwrap_cyclic(1.0);
        let y = s.as_slice();
        assert_eq!(y[2], 0.1);
        assert!((y[0] - (6.0 - TAU)).abs() < 1e-12);
        assert!((y[1] - (6.2 - TAU)).abs() < 1e-12);
        assert_eq!(y[3], 0.3);
        assert!(y.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn unwrap_after_centre() {
        let mut s = Samples::Three([6.0, 6.2, 0.1]);
        s.unwrap_cyclic(1.0);
        let y = s.as_slice();
        assert_eq!(y[0], 6.0);
        assert_eq!(y[1], 6.2);
        assert!((y[2] - (0.1 + TAU)).abs() < 1e-12);
    }

    #[test]
    fn unwrap_decreasing() {
        let mut s = Samples::Three([0.2, 0.05, 6.2]);
        s.unwrap_cyclic(-1.0);
        let y = s.as_slice();
        assert!((y[2] - (6.2 - TAU)).abs() < 1e-12);
    }

    #[test]
    fn unwrap_leaves_smooth_samples_alone() {
        let mut s = Samples::Five([1.0, 1.2, 1.4, 1.6, 1.8]);
        let before = s;
        s.unwrap_cyclic(1.0);
        assert_eq!(s, before);
    }

    #[test]
    fn inverse_no_real_root() {
        assert!(inverse_interpolate3(&[1.0, 0.5, 1.0]).is_none());
    }

    #[test]
    fn inverse_linear() {
        let n = inverse_interpolate3(&[-1.0, 0.0, 1.0]).unwrap();
        assert!(n.abs() < 1e-15);
        let n = inverse_interpolate3(&[-2.0, -1.0, 0.0]).unwrap();
        assert!((n - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_roots_ordered() {
        // (n − 0.5)(n + 2) = n² + 1.5n − 1 at n = −1, 0, 1
        let (r1, r2) = inverse_interpolate3_roots(&[-1.5, -1.0, 1.5]).unwrap();
        assert!((r1 + 2.0).abs() < 1e-12);
        assert!((r2 - 0.5).abs() < 1e-12);
        assert!((inverse_interpolate3(&[-1.5, -1.0, 1.5]).unwrap() - 0.5).abs() < 1e-12);
    }
}

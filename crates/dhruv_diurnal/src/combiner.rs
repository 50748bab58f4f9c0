//! Interpolation of cached noon samples to arbitrary day fractions.
//!
//! Every function reads a [`DayWindow`] and answers "what is this quantity
//! at noon of day `center` plus `t` days". [`Spread::Close`] uses the three
//! samples around `center` and serves per-day transit bookkeeping;
//! [`Spread::Central`] uses all five samples around the window centre and
//! serves the searches that may wander up to two days away.

use dhruv_frames::{altitude_rad, normalize_rad, normalize_signed_rad};
use dhruv_time::apparent_sidereal_time_rad;

use crate::day_window::{Coord, DayWindow};
use crate::error::DiurnalError;
use crate::interpolation::Samples;

/// Number of neighbouring noon samples used for an interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spread {
    /// 3 samples, centre ± 1 day.
    Close,
    /// 5 samples, window centre ± 2 days.
    Central,
}

impl Spread {
    /// The day a spread is centred on. Central always uses the window centre.
    const fn centre_of(self, center: i32) -> i32 {
        match self {
            Self::Close => center,
            Self::Central => 0,
        }
    }
}

/// Noon samples of `coord` around `center`, unwrapped when cyclic.
pub fn samples(
    window: &DayWindow<'_>,
    coord: Coord,
    center: i32,
    spread: Spread,
) -> Result<Samples, DiurnalError> {
    let c = spread.centre_of(center);
    let v = |k: i32| window.day(c + k).map(|d| d.coord(coord));
    let mut s = match spread {
        Spread::Close => Samples::Three([v(-1)?, v(0)?, v(1)?]),
        Spread::Central => Samples::Five([v(-2)?, v(-1)?, v(0)?, v(1)?, v(2)?]),
    };
    if coord.is_cyclic() {
        s.unwrap_cyclic(window.profile().ra_direction);
    }
    Ok(s)
}

/// `coord` at noon(`center`) + `t` days.
///
/// Cyclic coordinates are returned in [0, 2π). At `t = 0` the stored noon
/// sample is returned unchanged.
pub fn interpolate_coord(
    window: &DayWindow<'_>,
    coord: Coord,
    center: i32,
    spread: Spread,
    t: f64,
) -> Result<f64, DiurnalError> {
    let s = samples(window, coord, center, spread)?;
    let n = t + f64::from(center - spread.centre_of(center));
    let value = s.interpolate(n);
    Ok(if coord.is_cyclic() {
        normalize_rad(value)
    } else {
        value
    })
}

/// Local hour angle at noon(`center`) + `t`, in [−π, π).
///
/// Right ascension, nutation and obliquity are interpolated; apparent
/// sidereal time is recomputed at the target instant.
pub fn local_hour_angle(
    window: &DayWindow<'_>,
    center: i32,
    t: f64,
    spread: Spread,
) -> Result<f64, DiurnalError> {
    let ra = interpolate_coord(window, Coord::RightAscension, center, spread, t)?;
    let dpsi = interpolate_coord(window, Coord::NutationLongitude, center, spread, t)?;
    let eps = interpolate_coord(window, Coord::Obliquity, center, spread, t)?;
    let jd = window.noon_jd(center) + t;
    let gast = apparent_sidereal_time_rad(jd, dpsi, eps);
    Ok(normalize_signed_rad(
        gast - ra - window.location().longitude_west_rad(),
    ))
}

/// Geometric altitude of the body centre at window-centre noon + `t`.
pub fn altitude(window: &DayWindow<'_>, t: f64) -> Result<f64, DiurnalError> {
    let dec = interpolate_coord(window, Coord::Declination, 0, Spread::Central, t)?;
    let h = local_hour_angle(window, 0, t, Spread::Central)?;
    Ok(altitude_rad(window.location().latitude_rad(), dec, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body_profile::BodyProfile;
    use crate::geo::GeoCoords;
    use crate::test_support::CountingEphemeris;
    use std::f64::consts::TAU;

    const NOON: f64 = 2_460_390.0;

    fn window(eph: &CountingEphemeris, lon_east_deg: f64) -> DayWindow<'_> {
        DayWindow::new(
            eph,
            BodyProfile::sun(),
            GeoCoords::from_degrees(30.0, lon_east_deg).unwrap(),
            NOON,
        )
        .unwrap()
    }

    #[test]
    fn ra_at_zero_offset_is_stored_sample() {
        // RA wraps through 0 between the centre day and the next
        let eph = CountingEphemeris::with_ra_start(TAU - 0.01);
        let w = window(&eph, 0.0);
        for spread in [Spread::Close, Spread::Central] {
            let ra = interpolate_coord(&w, Coord::RightAscension, 0, spread, 0.0).unwrap();
            assert_eq!(ra, w.day(0).unwrap().right_ascension);
        }
        let ra = interpolate_coord(&w, Coord::RightAscension, 1, Spread::Close, 0.0).unwrap();
        assert_eq!(ra, w.day(1).unwrap().right_ascension);
    }

    #[test]
    fn ra_interpolates_across_wrap() {
        let eph = CountingEphemeris::with_ra_start(TAU - 0.01);
        let w = window(&eph, 0.0);
        for &t in &[0.25, 0.5, 0.75, -0.5, 1.5] {
            let ra = interpolate_coord(&w, Coord::RightAscension, 0, Spread::Central, t).unwrap();
            let expected = eph.ra(NOON + t);
            let diff = (ra - expected).abs();
            assert!(diff.min(TAU - diff) < 1e-9, "t={t}: {ra} vs {expected}");
            assert!((0.0..TAU).contains(&ra));
        }
    }

    #[test]
    fn close_spread_is_centred_on_its_day() {
        let eph = CountingEphemeris::default();
        let w = window(&eph, 0.0);
        let dec = interpolate_coord(&w, Coord::Declination, -1, Spread::Close, 0.3).unwrap();
        assert!((dec - eph.dec(NOON - 1.0 + 0.3)).abs() < 1e-6);
    }

    #[test]
    fn hour_angle_at_noon_matches_cached_sample() {
        let eph = CountingEphemeris::default();
        let w = window(&eph, 40.0);
        for k in -1..=1 {
            let h = local_hour_angle(&w, k, 0.0, Spread::Close).unwrap();
            assert!((h - w.day(k).unwrap().hour_angle).abs() < 1e-12);
        }
        let h = local_hour_angle(&w, 0, 0.0, Spread::Central).unwrap();
        assert!((h - w.day(0).unwrap().hour_angle).abs() < 1e-12);
    }

    #[test]
    fn hour_angle_advances_about_one_turn_per_day() {
        let eph = CountingEphemeris::default();
        let w = window(&eph, 0.0);
        let h0 = local_hour_angle(&w, 0, 0.0, Spread::Central).unwrap();
        let h1 = local_hour_angle(&w, 0, 0.1, Spread::Central).unwrap();
        let rate = normalize_signed_rad(h1 - h0) / 0.1;
        assert!((rate / TAU - 1.0).abs() < 0.01, "rate = {rate}");
    }

    #[test]
    fn altitude_matches_direct_formula() {
        let eph = CountingEphemeris::default();
        let w = window(&eph, 0.0);
        let t = 0.2;
        let h = local_hour_angle(&w, 0, t, Spread::Central).unwrap();
        let dec = eph.dec(NOON + t);
        let expected = altitude_rad(30.0_f64.to_radians(), dec, h);
        assert!((altitude(&w, t).unwrap() - expected).abs() < 1e-7);
    }
}

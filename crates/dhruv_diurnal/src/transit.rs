//! Meridian transit as a fixed point of the local hour angle.
//!
//! With the hour angle advancing about one full turn per day, the offset
//! from noon to transit satisfies `t = t − H(t)/2π`; iterating that map is
//! Newton's method under the unit-rate approximation.

use std::f64::consts::TAU;

use crate::combiner::{Spread, local_hour_angle};
use crate::day_window::DayWindow;
use crate::error::DiurnalError;

/// Half-width of the day a transit is attributed to, days from noon.
const HALF_DAY: f64 = 0.5;

fn iterate(
    window: &DayWindow<'_>,
    day: i32,
    seed: f64,
    spread: Spread,
    precision_rad: f64,
    max_iterations: u32,
) -> Result<f64, DiurnalError> {
    let mut t = seed;
    for i in 0..max_iterations {
        let h = local_hour_angle(window, day, t, spread)?;
        log::trace!("transit day {day} iter {i}: t = {t:.9}, H = {h:.3e}");
        if h.abs() <= precision_rad {
            return Ok(t);
        }
        t -= h / TAU;
    }
    Err(DiurnalError::NoConvergence(
        "transit iteration exceeded max_transit_iterations",
    ))
}

/// Offset from noon of `day` to that day's transit using the 3-sample
/// interpolation around `day`. Valid for `day` in −1..=1; memoized in the
/// day's slot.
pub fn close_transit_offset(
    window: &mut DayWindow<'_>,
    day: i32,
    precision_rad: f64,
    max_iterations: u32,
) -> Result<f64, DiurnalError> {
    if let Some(t) = window.day(day)?.transit_offset {
        return Ok(t);
    }
    let seed = -window.day(day)?.hour_angle / TAU;
    let t = iterate(window, day, seed, Spread::Close, precision_rad, max_iterations)?;
    window.day_mut(day)?.transit_offset = Some(t);
    Ok(t)
}

/// Offset from the window-centre noon to the centre day's transit, using
/// the 5-sample interpolation.
///
/// `None` when the transit nearest noon falls outside [noon − ½, noon + ½):
/// the Moon skips a meridian passage about once a month.
pub fn central_transit_offset(
    window: &DayWindow<'_>,
    precision_rad: f64,
    max_iterations: u32,
) -> Result<Option<f64>, DiurnalError> {
    let center = window.day(0)?;
    let seed = center
        .transit_offset
        .unwrap_or(-center.hour_angle / TAU);
    let t = iterate(window, 0, seed, Spread::Central, precision_rad, max_iterations)?;
    if (-HALF_DAY..HALF_DAY).contains(&t) {
        Ok(Some(t))
    } else {
        log::debug!(
            "no transit on day of noon jd {:.5} (nearest at {t:+.4} d)",
            window.center_noon_jd()
        );
        Ok(None)
    }
}

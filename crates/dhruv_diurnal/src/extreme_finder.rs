//! Refinement of an approximate rise/set offset.
//!
//! Successive 3-point inverse interpolation of
//! `altitude(τ + t) − h0(τ + t)` with a halving sampling half-width.

use crate::combiner::{Spread, altitude, interpolate_coord};
use crate::day_window::{Coord, DayWindow};
use crate::diurnal_types::DiurnalConfig;
use crate::error::DiurnalError;
use crate::interpolation::inverse_interpolate3;

/// Largest accepted extrapolation of the fitted parabola, in half-widths.
const MAX_STEP_INTERVALS: f64 = 4.0;

fn altitude_above_horizon(window: &DayWindow<'_>, t: f64) -> Result<f64, DiurnalError> {
    let h0 = interpolate_coord(window, Coord::HorizonAltitude, 0, Spread::Central, t)?;
    Ok(altitude(window, t)? - h0)
}

/// Refine `seed` (days from the centre transit `transit`) until the body
/// sits on its standard altitude within `precision_rad`.
///
/// Returns the refined offset from the transit, or `None` when the
/// interpolated altitude curve has no crossing near the seed or the
/// result lies on the wrong side of the transit.
pub fn refine_extreme(
    window: &DayWindow<'_>,
    direction: i8,
    transit: f64,
    seed: f64,
    precision_rad: f64,
    config: &DiurnalConfig,
) -> Result<Option<f64>, DiurnalError> {
    let diff = |t: f64| altitude_above_horizon(window, transit + t);

    let mut t = seed;
    let mut interval = config.initial_interval_days;
    let mut last_step = f64::INFINITY;
    let mut settled = false;

    for i in 0..config.max_refine_iterations {
        let y = diff(t)?;
        log::trace!("refine iter {i}: t = {t:+.9}, diff = {y:+.3e}, interval = {interval:.3e}");
        if y.abs() <= precision_rad {
            settled = true;
            break;
        }

        let ys = [diff(t - interval)?, y, diff(t + interval)?];
        let n = match inverse_interpolate3(&ys) {
            Some(n) if n.abs() <= MAX_STEP_INTERVALS => n,
            _ => {
                log::debug!("no horizon crossing near offset {t:+.5} d");
                return Ok(None);
            }
        };

        let step = n * interval;
        if step.abs() >= last_step {
            log::warn!(
                "rise/set refinement stalled at offset {t:+.7} d (|diff| = {:.2e} rad); accepting",
                y.abs()
            );
            settled = true;
            break;
        }
        t += step;
        last_step = step.abs();
        interval = (interval / 2.0).max(config.min_interval_days);
    }

    if !settled {
        log::warn!(
            "rise/set refinement hit max_refine_iterations at offset {t:+.7} d; accepting"
        );
    }

    let d = f64::from(direction);
    if d * t <= 0.0 || t.abs() >= 1.0 {
        log::debug!("refined offset {t:+.5} d inconsistent with direction {direction:+}");
        return Ok(None);
    }
    Ok(Some(t))
}

//! Circumpolar regime classification and first guess for rise/set.
//!
//! The rise/set hour angle H0 satisfies
//! `cos H0 = (sin h0 − sin φ sin δ) / (cos φ cos δ)`. With that sign
//! convention `cos H0 < −1` means the body stays above the standard
//! altitude all day and `cos H0 > 1` means it stays below.
//!
//! The decision uses the cosine at the centre day's transit and at the
//! transit of the neighbouring day on the requested side (yesterday for a
//! rise, tomorrow for a set):
//!
//! | centre      | neighbour   | result                                   |
//! |-------------|-------------|------------------------------------------|
//! | normal      | normal      | `±acos(c₀)/2π`                           |
//! | polar       | polar       | absent                                   |
//! | below       | normal      | absent                                   |
//! | normal      | below       | `±acos(c₀)/2π`                           |
//! | normal      | above       | boundary search                          |
//! | above       | normal      | boundary search                          |

use std::f64::consts::TAU;

use dhruv_frames::horizon_hour_angle_cos;

use crate::combiner::{Spread, interpolate_coord};
use crate::day_window::{Coord, DayWindow};
use crate::diurnal_types::DiurnalConfig;
use crate::error::DiurnalError;
use crate::interpolation::{inverse_interpolate3, inverse_interpolate3_roots};
use crate::transit::close_transit_offset;

/// Horizon regime implied by a rise/set hour-angle cosine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizonRegime {
    /// Rises and sets.
    Normal,
    /// Never sets (`cos H0 < −1`).
    AlwaysAbove,
    /// Never rises (`cos H0 > 1`).
    AlwaysBelow,
}

impl HorizonRegime {
    pub fn classify(cos_h0: f64) -> Self {
        if cos_h0 < -1.0 {
            Self::AlwaysAbove
        } else if cos_h0 > 1.0 {
            Self::AlwaysBelow
        } else {
            Self::Normal
        }
    }

    pub fn is_polar(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Rise/set hour-angle cosine at the transit of `day` (−1..=1), memoized
/// in the day's slot.
pub fn cos_extreme_at_transit(
    window: &mut DayWindow<'_>,
    day: i32,
    precision_rad: f64,
    config: &DiurnalConfig,
) -> Result<f64, DiurnalError> {
    if let Some(c) = window.day(day)?.cos_extreme_transit {
        return Ok(c);
    }
    let tau = close_transit_offset(window, day, precision_rad, config.max_transit_iterations)?;
    let dec = interpolate_coord(window, Coord::Declination, day, Spread::Close, tau)?;
    let h0 = interpolate_coord(window, Coord::HorizonAltitude, day, Spread::Close, tau)?;
    let c = horizon_hour_angle_cos(window.location().latitude_rad(), dec, h0);
    window.day_mut(day)?.cos_extreme_transit = Some(c);
    Ok(c)
}

/// First guess for the offset from the centre transit `transit` (days from
/// centre noon) to the rise (`direction` −1) or set (+1), or `None` when
/// the event does not happen on the centre day.
pub fn approximate_extreme(
    window: &mut DayWindow<'_>,
    direction: i8,
    transit: f64,
    precision_rad: f64,
    config: &DiurnalConfig,
) -> Result<Option<f64>, DiurnalError> {
    let d = f64::from(direction);
    let c0 = cos_extreme_at_transit(window, 0, precision_rad, config)?;
    let ca = cos_extreme_at_transit(window, i32::from(direction), precision_rad, config)?;
    let centre = HorizonRegime::classify(c0);
    let adjacent = HorizonRegime::classify(ca);

    let ordinary = || Some(d * c0.acos() / TAU);

    let seed = match (centre, adjacent) {
        (HorizonRegime::Normal, HorizonRegime::Normal) => ordinary(),
        (c, a) if c.is_polar() && a.is_polar() => None,
        (HorizonRegime::AlwaysBelow, _) => None,
        (HorizonRegime::Normal, HorizonRegime::AlwaysBelow) => ordinary(),
        _ => boundary_seed(window, d, transit, centre.is_polar())?,
    };

    log::debug!(
        "{} regime centre {centre:?} (cos {c0:.5}), side {direction:+} {adjacent:?} (cos {ca:.5}) -> {seed:?}",
        window.profile().body
    );
    Ok(seed)
}

/// Seed for a day where the body crosses into or out of "always above".
///
/// First the instant `t*` where the noon cosine crosses −1 is found by
/// inverse interpolation. With `s` the distance from the transit to `t*`
/// on the requested side, an event exists iff `s > ½` when the centre is
/// normal (the crossing happens after lower culmination) or `s < ½` when
/// the centre is always-above (the crossing happens before it). The seed is
/// then the zero of `g(t) = d·(t − τ) − acos(c(t))/2π` bracketed by `t*`
/// and the transit (normal centre) or lower culmination (polar centre).
fn boundary_seed(
    window: &mut DayWindow<'_>,
    d: f64,
    transit: f64,
    centre_polar: bool,
) -> Result<Option<f64>, DiurnalError> {
    let lat = window.location().latitude_rad();
    let mut shifted = [0.0; 3];
    for (slot, k) in shifted.iter_mut().zip(-1..=1) {
        *slot = window.day_mut(k)?.cos_extreme_noon(lat) + 1.0;
    }

    let Some((r1, r2)) = inverse_interpolate3_roots(&shifted) else {
        log::debug!("no circumpolar threshold near the centre day");
        return Ok(None);
    };
    let threshold = [r1, r2]
        .into_iter()
        .filter(|r| d * (r - transit) > 0.0)
        .min_by(|a, b| (d * (a - transit)).total_cmp(&(d * (b - transit))));
    let Some(threshold) = threshold else {
        log::debug!("circumpolar threshold lies on the wrong side of transit");
        return Ok(None);
    };

    let s = d * (threshold - transit);
    if centre_polar == (s > 0.5) {
        log::debug!("threshold {s:.4} d from transit: event belongs to another day");
        return Ok(None);
    }

    let anchor = if centre_polar {
        transit + d / 2.0
    } else {
        transit
    };
    let g = |t: f64| -> Result<f64, DiurnalError> {
        let dec = interpolate_coord(window, Coord::Declination, 0, Spread::Central, t)?;
        let h0 = interpolate_coord(window, Coord::HorizonAltitude, 0, Spread::Central, t)?;
        let c = horizon_hour_angle_cos(lat, dec, h0).clamp(-1.0, 1.0);
        Ok(d * (t - transit) - c.acos() / TAU)
    };

    let mid = (threshold + anchor) / 2.0;
    let half = (anchor - threshold) / 2.0;
    let ys = [g(threshold)?, g(mid)?, g(anchor)?];
    match inverse_interpolate3(&ys) {
        Some(n) if n.abs() <= 1.0 => Ok(Some(mid + n * half - transit)),
        _ => {
            log::debug!("no horizon crossing between threshold and anchor");
            Ok(None)
        }
    }
}

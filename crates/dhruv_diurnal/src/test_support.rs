//! Deterministic stand-in for the ephemeris service.

use std::cell::Cell;

use dhruv_core::{EngineError, Ephemeris, Quantity, QuantityValues, Query};
use dhruv_frames::normalize_rad;
use dhruv_time::apparent_sidereal_time_rad;

const EPOCH_JD: f64 = 2_460_390.0;
const RA_RATE: f64 = 0.0172;
const DPSI: f64 = 5.0e-5;
const EPS: f64 = 0.4091;

/// Sun-like body moving uniformly in RA with a sinusoidal declination.
/// Counts how often it is asked.
pub(crate) struct CountingEphemeris {
    ra_start: f64,
    calls: Cell<u32>,
}

impl Default for CountingEphemeris {
    fn default() -> Self {
        Self::with_ra_start(0.2)
    }
}

impl CountingEphemeris {
    pub(crate) fn with_ra_start(ra_start: f64) -> Self {
        Self {
            ra_start,
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.get()
    }

    pub(crate) fn ra(&self, jd: f64) -> f64 {
        normalize_rad(self.ra_start + RA_RATE * (jd - EPOCH_JD))
    }

    pub(crate) fn dec(&self, jd: f64) -> f64 {
        0.4 * (0.0172 * (jd - 2_460_300.0)).sin()
    }

    pub(crate) fn gha(&self, jd: f64) -> f64 {
        normalize_rad(apparent_sidereal_time_rad(jd, DPSI, EPS) - self.ra(jd))
    }
}

impl Ephemeris for CountingEphemeris {
    fn evaluate(&self, query: &Query) -> Result<QuantityValues, EngineError> {
        self.calls.set(self.calls.get() + 1);
        let jd = query.epoch_jd;
        let mut out = QuantityValues::default();
        for q in query.quantities.iter() {
            let value = match q {
                Quantity::RightAscension => self.ra(jd),
                Quantity::Declination => self.dec(jd),
                Quantity::GreenwichHourAngle => self.gha(jd),
                Quantity::NutationLongitude => DPSI,
                Quantity::TrueObliquity => EPS,
                Quantity::HorizontalParallax => 0.0166,
            };
            out.set(q, value);
        }
        Ok(out)
    }
}

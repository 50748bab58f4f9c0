//! Five-day sliding window of per-noon ephemeris samples.

use dhruv_core::{Ephemeris, Quantity, Query};
use dhruv_frames::{horizon_hour_angle_cos, normalize_signed_rad};

use crate::body_profile::BodyProfile;
use crate::error::DiurnalError;
use crate::geo::GeoCoords;

/// Offset of the first slot relative to the window centre.
pub const WINDOW_BACK: i32 = -2;
/// Offset of the last slot relative to the window centre.
pub const WINDOW_FRONT: i32 = 2;

const WINDOW_LEN: usize = 5;

/// Per-noon scalar that can be interpolated across window slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coord {
    Declination,
    /// Cyclic in [0, 2π); unwrapped before interpolation.
    RightAscension,
    NutationLongitude,
    Obliquity,
    /// Standard altitude from the body's horizon rule.
    HorizonAltitude,
}

impl Coord {
    pub const fn is_cyclic(self) -> bool {
        matches!(self, Self::RightAscension)
    }
}

/// Ephemeris snapshot at one local noon plus lazily derived dependents.
#[derive(Debug, Clone, PartialEq)]
pub struct DayValues {
    pub noon_jd: f64,
    /// Local hour angle at noon, [−π, π).
    pub hour_angle: f64,
    pub declination: f64,
    pub right_ascension: f64,
    pub nutation_lon: f64,
    pub obliquity: f64,
    pub horizon_altitude: f64,
    pub(crate) cos_extreme_noon: Option<f64>,
    pub(crate) transit_offset: Option<f64>,
    pub(crate) cos_extreme_transit: Option<f64>,
}

impl DayValues {
    fn fetch(
        ephemeris: &dyn Ephemeris,
        profile: &BodyProfile,
        location: &GeoCoords,
        noon_jd: f64,
    ) -> Result<Self, DiurnalError> {
        let query = Query::new(profile.body, noon_jd, profile.quantities());
        let values = ephemeris.evaluate(&query)?;

        let gha = values.require(profile.reference_hour_angle)?;
        let parallax = if profile.horizon.needs_parallax() {
            values.require(Quantity::HorizontalParallax)?
        } else {
            0.0
        };

        Ok(Self {
            noon_jd,
            hour_angle: normalize_signed_rad(gha - location.longitude_west_rad()),
            declination: values.require(profile.declination)?,
            right_ascension: values.require(profile.right_ascension)?,
            nutation_lon: values.require(Quantity::NutationLongitude)?,
            obliquity: values.require(Quantity::TrueObliquity)?,
            horizon_altitude: profile.horizon.altitude_rad(parallax),
            cos_extreme_noon: None,
            transit_offset: None,
            cos_extreme_transit: None,
        })
    }

    pub fn coord(&self, key: Coord) -> f64 {
        match key {
            Coord::Declination => self.declination,
            Coord::RightAscension => self.right_ascension,
            Coord::NutationLongitude => self.nutation_lon,
            Coord::Obliquity => self.obliquity,
            Coord::HorizonAltitude => self.horizon_altitude,
        }
    }

    /// Cosine of the rise/set hour angle from the noon sample alone.
    /// Computed once per slot.
    pub fn cos_extreme_noon(&mut self, latitude_rad: f64) -> f64 {
        let (dec, h0) = (self.declination, self.horizon_altitude);
        *self
            .cos_extreme_noon
            .get_or_insert_with(|| horizon_hour_angle_cos(latitude_rad, dec, h0))
    }

    /// Cached offset from this noon to this day's transit, if resolved.
    pub fn transit_offset(&self) -> Option<f64> {
        self.transit_offset
    }

    /// Cached rise/set hour-angle cosine at this day's transit, if resolved.
    pub fn cos_extreme_transit(&self) -> Option<f64> {
        self.cos_extreme_transit
    }
}

/// Five noon samples at offsets −2..=+2 around a centre day.
///
/// Every slot is fetched when the window is built, so the window is always
/// complete; [`push`](Self::push) slides it one day forward with a single
/// new ephemeris evaluation.
pub struct DayWindow<'a> {
    ephemeris: &'a dyn Ephemeris,
    profile: BodyProfile,
    location: GeoCoords,
    anchor_noon_jd: f64,
    shift: i64,
    slots: [DayValues; WINDOW_LEN],
}

impl std::fmt::Debug for DayWindow<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayWindow")
            .field("body", &self.profile.body)
            .field("center_noon_jd", &self.center_noon_jd())
            .field("shift", &self.shift)
            .finish()
    }
}

impl<'a> DayWindow<'a> {
    pub fn new(
        ephemeris: &'a dyn Ephemeris,
        profile: BodyProfile,
        location: GeoCoords,
        anchor_noon_jd: f64,
    ) -> Result<Self, DiurnalError> {
        let fetch =
            |k: f64| DayValues::fetch(ephemeris, &profile, &location, anchor_noon_jd + k);
        let slots = [fetch(-2.0)?, fetch(-1.0)?, fetch(0.0)?, fetch(1.0)?, fetch(2.0)?];
        Ok(Self {
            ephemeris,
            profile,
            location,
            anchor_noon_jd,
            shift: 0,
            slots,
        })
    }

    pub fn profile(&self) -> &BodyProfile {
        &self.profile
    }

    pub fn location(&self) -> &GeoCoords {
        &self.location
    }

    /// Noon of the centre day.
    pub fn center_noon_jd(&self) -> f64 {
        self.noon_jd(0)
    }

    /// Noon of the day at `offset` from the centre.
    pub fn noon_jd(&self, offset: i32) -> f64 {
        self.anchor_noon_jd + (self.shift + i64::from(offset)) as f64
    }

    fn index(offset: i32) -> Result<usize, DiurnalError> {
        if (WINDOW_BACK..=WINDOW_FRONT).contains(&offset) {
            Ok((offset - WINDOW_BACK) as usize)
        } else {
            Err(DiurnalError::OutsideWindow { offset })
        }
    }

    pub fn day(&self, offset: i32) -> Result<&DayValues, DiurnalError> {
        Ok(&self.slots[Self::index(offset)?])
    }

    pub fn day_mut(&mut self, offset: i32) -> Result<&mut DayValues, DiurnalError> {
        Ok(&mut self.slots[Self::index(offset)?])
    }

    /// Drop the oldest slot and fetch a new one after the newest.
    pub fn push(&mut self) -> Result<(), DiurnalError> {
        let fresh_noon = self.noon_jd(WINDOW_FRONT + 1);
        let fresh = DayValues::fetch(self.ephemeris, &self.profile, &self.location, fresh_noon)?;
        self.slots.rotate_left(1);
        self.slots[WINDOW_LEN - 1] = fresh;
        self.shift += 1;
        log::debug!(
            "{} window slid to centre noon jd {:.5}",
            self.profile.body,
            self.center_noon_jd()
        );
        Ok(())
    }
}

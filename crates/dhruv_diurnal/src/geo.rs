//! Observer coordinates.

use std::f64::consts::{FRAC_PI_2, PI};
use std::hash::{Hash, Hasher};

use dhruv_frames::ARCSEC_TO_RAD;

const ARCSEC_PER_TURN: i64 = 1_296_000;

use crate::error::DiurnalError;

/// Geographic observer position.
///
/// Longitude is stored west-positive, the sign used by the hour-angle
/// formula `H = θ − α − L`, in (−π, π]. Equality and hashing compare both
/// components rounded to whole arcseconds, longitude taken modulo a turn.
#[derive(Debug, Clone, Copy)]
pub struct GeoCoords {
    latitude_rad: f64,
    longitude_west_rad: f64,
}

impl GeoCoords {
    /// Build from radians, latitude north-positive and longitude
    /// west-positive. Longitude must lie in [−π, π].
    pub fn new(latitude_rad: f64, longitude_west_rad: f64) -> Result<Self, DiurnalError> {
        if !latitude_rad.is_finite() || !longitude_west_rad.is_finite() {
            return Err(DiurnalError::InvalidLocation("coordinates must be finite"));
        }
        if latitude_rad.abs() > FRAC_PI_2 {
            return Err(DiurnalError::InvalidLocation(
                "latitude must be within [-90, 90] degrees",
            ));
        }
        if longitude_west_rad.abs() > PI {
            return Err(DiurnalError::InvalidLocation(
                "longitude must be within [-180, 180] degrees",
            ));
        }
        // ±180° is one meridian
        let longitude_west_rad = if longitude_west_rad == -PI {
            PI
        } else {
            longitude_west_rad
        };
        Ok(Self {
            latitude_rad,
            longitude_west_rad,
        })
    }

    /// Build from degrees in the conventional sign (longitude east-positive).
    pub fn from_degrees(latitude_deg: f64, longitude_east_deg: f64) -> Result<Self, DiurnalError> {
        Self::new(latitude_deg.to_radians(), -longitude_east_deg.to_radians())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_rad
    }

    /// Longitude in radians, west positive.
    pub fn longitude_west_rad(&self) -> f64 {
        self.longitude_west_rad
    }

    /// Longitude in radians, east positive.
    pub fn longitude_east_rad(&self) -> f64 {
        -self.longitude_west_rad
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_rad.to_degrees()
    }

    pub fn longitude_east_deg(&self) -> f64 {
        self.longitude_east_rad().to_degrees()
    }

    fn buckets(&self) -> (i64, i64) {
        let lon = (self.longitude_west_rad / ARCSEC_TO_RAD).round() as i64;
        (
            (self.latitude_rad / ARCSEC_TO_RAD).round() as i64,
            lon.rem_euclid(ARCSEC_PER_TURN),
        )
    }
}

impl PartialEq for GeoCoords {
    fn eq(&self, other: &Self) -> bool {
        self.buckets() == other.buckets()
    }
}

impl Eq for GeoCoords {}

impl Hash for GeoCoords {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buckets().hash(state);
    }
}

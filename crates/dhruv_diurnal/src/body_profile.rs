//! Per-body capability descriptors and standard-altitude rules.

use dhruv_core::{Body, Quantity, QuantitySet};
use dhruv_frames::ARCMIN_TO_RAD;

/// How the "on the horizon" altitude of a body's centre is defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizonRule {
    /// Constant altitude in radians.
    Fixed(f64),
    /// `0.7275·π − 34′` from the day's equatorial horizontal parallax π.
    LunarParallax,
}

impl HorizonRule {
    /// Sunrise/sunset: 34′ refraction plus 16′ semidiameter.
    pub const SUN_STANDARD: Self = Self::Fixed(-50.0 * ARCMIN_TO_RAD);
    /// Civil twilight, centre 6° below the horizon.
    pub const CIVIL_TWILIGHT: Self = Self::Fixed(-6.0 * 60.0 * ARCMIN_TO_RAD);
    /// Nautical twilight, centre 12° below the horizon.
    pub const NAUTICAL_TWILIGHT: Self = Self::Fixed(-12.0 * 60.0 * ARCMIN_TO_RAD);
    /// Astronomical twilight, centre 18° below the horizon.
    pub const ASTRONOMICAL_TWILIGHT: Self = Self::Fixed(-18.0 * 60.0 * ARCMIN_TO_RAD);

    /// Standard altitude in radians. `parallax_rad` is only read by
    /// [`HorizonRule::LunarParallax`].
    pub fn altitude_rad(self, parallax_rad: f64) -> f64 {
        match self {
            Self::Fixed(h0) => h0,
            Self::LunarParallax => 0.7275 * parallax_rad - 34.0 * ARCMIN_TO_RAD,
        }
    }

    /// Whether the rule needs the horizontal parallax from the service.
    pub fn needs_parallax(self) -> bool {
        matches!(self, Self::LunarParallax)
    }
}

/// What the diurnal search needs to know about a body.
///
/// The quantity ids select what is requested from the ephemeris service;
/// `ra_direction` is the sense in which right ascension advances (used to
/// unwrap its 2π cycle before interpolation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyProfile {
    pub body: Body,
    pub declination: Quantity,
    pub right_ascension: Quantity,
    /// Seeds each noon sample's local hour angle.
    pub reference_hour_angle: Quantity,
    pub ra_direction: f64,
    pub horizon: HorizonRule,
}

impl BodyProfile {
    pub fn sun() -> Self {
        Self::sun_with_horizon(HorizonRule::SUN_STANDARD)
    }

    /// Sun with a non-standard horizon, e.g. one of the twilight presets.
    pub fn sun_with_horizon(horizon: HorizonRule) -> Self {
        Self {
            body: Body::Sun,
            declination: Quantity::Declination,
            right_ascension: Quantity::RightAscension,
            reference_hour_angle: Quantity::GreenwichHourAngle,
            ra_direction: 1.0,
            horizon,
        }
    }

    pub fn moon() -> Self {
        Self {
            body: Body::Moon,
            declination: Quantity::Declination,
            right_ascension: Quantity::RightAscension,
            reference_hour_angle: Quantity::GreenwichHourAngle,
            ra_direction: 1.0,
            horizon: HorizonRule::LunarParallax,
        }
    }

    /// Default profile for a body.
    pub fn for_body(body: Body) -> Self {
        match body {
            Body::Sun => Self::sun(),
            Body::Moon => Self::moon(),
        }
    }

    /// Everything one noon sample asks of the ephemeris service.
    pub fn quantities(&self) -> QuantitySet {
        let set = QuantitySet::EMPTY
            .with(self.declination)
            .with(self.right_ascension)
            .with(self.reference_hour_angle)
            .with(Quantity::NutationLongitude)
            .with(Quantity::TrueObliquity);
        if self.horizon.needs_parallax() {
            set.with(Quantity::HorizontalParallax)
        } else {
            set
        }
    }
}

//! Transit, rise and set of the Sun and Moon for a fixed observer.
//!
//! The search samples the ephemeris once per local noon and keeps five
//! consecutive days in a sliding [`DayWindow`]. Everything else is
//! interpolated from those samples:
//!
//! - the meridian transit is the zero of the interpolated local hour angle,
//! - rise and set are seeded from the closed-form hour angle at the
//!   standard altitude (with special handling around the circumpolar
//!   thresholds) and refined by inverse interpolation of the altitude.
//!
//! ```no_run
//! use dhruv_core::{Engine, EngineConfig};
//! use dhruv_diurnal::{BodyProfile, DiurnalRequest, GeoCoords, diurnal_events};
//! use dhruv_time::CivilDate;
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! let request = DiurnalRequest::new(
//!     BodyProfile::sun(),
//!     CivilDate::new(2024, 6, 21)?,
//!     GeoCoords::from_degrees(45.0, 7.0)?,
//! );
//! for occurrence in diurnal_events(&engine, request, 3)? {
//!     println!("{occurrence:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod body_profile;
pub mod combiner;
pub mod day_window;
pub mod diurnal_types;
pub mod error;
pub mod extreme_approx;
pub mod extreme_finder;
pub mod geo;
pub mod interpolation;
pub mod search;
pub mod transit;

#[cfg(test)]
mod test_support;

pub use body_profile::{BodyProfile, HorizonRule};
pub use day_window::{Coord, DayValues, DayWindow};
pub use diurnal_types::{
    BodyDiurnalPhase, DEFAULT_PRECISION_RAD, DiurnalConfig, DiurnalEvent, DiurnalOccurrence,
    DiurnalPhase, DiurnalRequest, MIN_PRECISION_RAD, PhaseSet,
};
pub use error::DiurnalError;
pub use extreme_approx::HorizonRegime;
pub use geo::GeoCoords;
pub use search::{DiurnalSearch, diurnal_events, next_diurnal_event};

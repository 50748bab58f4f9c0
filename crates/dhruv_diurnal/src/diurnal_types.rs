//! Types for transit, rise and set searches.

use std::fmt::{Display, Formatter};

use dhruv_core::Body;
use dhruv_frames::ARCSEC_TO_RAD;
use dhruv_time::{CivilDate, approximate_local_noon_jd};

use crate::body_profile::BodyProfile;
use crate::error::DiurnalError;
use crate::geo::GeoCoords;

/// Default stopping precision for every iterative refinement, ~2″.
pub const DEFAULT_PRECISION_RAD: f64 = 1.0e-5;

/// Finest accepted precision, ~2 mas. Sidereal time at present-day Julian
/// Dates resolves to a few nanoradians in `f64`, so tighter limits never
/// settle.
pub const MIN_PRECISION_RAD: f64 = 1.0e-8;

/// One of the three daily phases of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiurnalPhase {
    Rising,
    Transit,
    Setting,
}

impl DiurnalPhase {
    /// Canonical per-day order.
    pub const ALL: [DiurnalPhase; 3] = [Self::Rising, Self::Transit, Self::Setting];

    /// Side of the transit the phase falls on: −1, 0 or +1.
    pub const fn direction(self) -> i8 {
        match self {
            Self::Rising => -1,
            Self::Transit => 0,
            Self::Setting => 1,
        }
    }

    /// Rising and setting are horizon crossings; transit is not.
    pub const fn is_extreme(self) -> bool {
        !matches!(self, Self::Transit)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Rising => "rise",
            Self::Transit => "transit",
            Self::Setting => "set",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Rising => 0b001,
            Self::Transit => 0b010,
            Self::Setting => 0b100,
        }
    }
}

impl Display for DiurnalPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Body × phase label carried by every produced occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyDiurnalPhase {
    pub body: Body,
    pub phase: DiurnalPhase,
}

impl Display for BodyDiurnalPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.body, self.phase)
    }
}

/// Subset of {rise, transit, set}, always iterated rise → transit → set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b111);

    pub const fn with(self, phase: DiurnalPhase) -> Self {
        Self(self.0 | phase.bit())
    }

    pub const fn contains(self, phase: DiurnalPhase) -> bool {
        self.0 & phase.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = DiurnalPhase> {
        DiurnalPhase::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<DiurnalPhase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = DiurnalPhase>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// A single diurnal search request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiurnalRequest {
    pub profile: BodyProfile,
    /// Civil date of the first day searched.
    pub date: CivilDate,
    pub location: GeoCoords,
    pub phases: PhaseSet,
    /// Angular stopping criterion for all refinements, radians.
    pub precision_rad: f64,
}

impl DiurnalRequest {
    /// All three phases at the default precision.
    pub fn new(profile: BodyProfile, date: CivilDate, location: GeoCoords) -> Self {
        Self {
            profile,
            date,
            location,
            phases: PhaseSet::ALL,
            precision_rad: DEFAULT_PRECISION_RAD,
        }
    }

    pub fn with_phases(mut self, phases: PhaseSet) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_precision_arcsec(mut self, arcsec: f64) -> Self {
        self.precision_rad = arcsec * ARCSEC_TO_RAD;
        self
    }

    pub fn validate(&self) -> Result<(), DiurnalError> {
        if self.phases.is_empty() {
            return Err(DiurnalError::InvalidRequest("phase set must not be empty"));
        }
        if !self.precision_rad.is_finite() || self.precision_rad <= 0.0 {
            return Err(DiurnalError::InvalidRequest(
                "precision must be positive and finite",
            ));
        }
        if self.precision_rad < MIN_PRECISION_RAD {
            return Err(DiurnalError::InvalidRequest(
                "precision is finer than MIN_PRECISION_RAD",
            ));
        }
        Ok(())
    }

    /// Local mean noon of `date`, the anchor of the first searched day.
    pub fn anchor_noon_jd(&self) -> f64 {
        approximate_local_noon_jd(self.date.jd_midnight(), self.location.longitude_east_deg())
    }
}

/// Iteration limits for the diurnal search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiurnalConfig {
    /// Cap on transit fixed-point iterations (default 50).
    pub max_transit_iterations: u32,
    /// Cap on rise/set refinement steps (default 50).
    pub max_refine_iterations: u32,
    /// First sampling half-width of the rise/set refinement, days (default 30 min).
    pub initial_interval_days: f64,
    /// Floor for the halving half-width, days (default ~0.9 s).
    pub min_interval_days: f64,
}

impl Default for DiurnalConfig {
    fn default() -> Self {
        Self {
            max_transit_iterations: 50,
            max_refine_iterations: 50,
            initial_interval_days: 0.5 / 24.0,
            min_interval_days: 1.0e-5,
        }
    }
}

impl DiurnalConfig {
    pub fn validate(&self) -> Result<(), DiurnalError> {
        if self.max_transit_iterations == 0 || self.max_refine_iterations == 0 {
            return Err(DiurnalError::InvalidRequest(
                "iteration caps must be greater than zero",
            ));
        }
        if !(self.initial_interval_days.is_finite() && self.initial_interval_days > 0.0) {
            return Err(DiurnalError::InvalidRequest(
                "initial_interval_days must be positive",
            ));
        }
        if !(self.min_interval_days > 0.0 && self.min_interval_days <= self.initial_interval_days)
        {
            return Err(DiurnalError::InvalidRequest(
                "min_interval_days must be in (0, initial_interval_days]",
            ));
        }
        Ok(())
    }
}

/// A resolved transit, rise or set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiurnalEvent {
    pub tag: BodyDiurnalPhase,
    /// Instant of the event, Julian Date.
    pub jd: f64,
}

/// One element of the output sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiurnalOccurrence {
    Event(DiurnalEvent),
    /// No such event on the day anchored at `day_noon_jd` (missing transit
    /// or circumpolar body).
    Absent {
        tag: BodyDiurnalPhase,
        day_noon_jd: f64,
    },
}

impl DiurnalOccurrence {
    pub fn tag(&self) -> BodyDiurnalPhase {
        match self {
            Self::Event(e) => e.tag,
            Self::Absent { tag, .. } => *tag,
        }
    }

    pub fn phase(&self) -> DiurnalPhase {
        self.tag().phase
    }

    /// Event instant, or `None` when absent.
    pub fn jd(&self) -> Option<f64> {
        match self {
            Self::Event(e) => Some(e.jd),
            Self::Absent { .. } => None,
        }
    }

    pub fn event(&self) -> Option<&DiurnalEvent> {
        match self {
            Self::Event(e) => Some(e),
            Self::Absent { .. } => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }
}

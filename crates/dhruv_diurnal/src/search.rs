//! Pull-based day-by-day search for transit, rise and set.

use std::iter::FusedIterator;

use dhruv_core::Ephemeris;

use crate::day_window::DayWindow;
use crate::diurnal_types::{
    BodyDiurnalPhase, DiurnalConfig, DiurnalEvent, DiurnalOccurrence, DiurnalPhase,
    DiurnalRequest,
};
use crate::error::DiurnalError;
use crate::extreme_approx::approximate_extreme;
use crate::extreme_finder::refine_extreme;
use crate::transit::central_transit_offset;

/// Days scanned by [`next_diurnal_event`] before giving up.
const NEXT_EVENT_SCAN_DAYS: usize = 366;

/// Lazy, unbounded sequence of occurrences for one request.
///
/// Each day yields one occurrence per requested phase, in the order
/// rise → transit → set, starting at the request's civil date. Days
/// without an event yield [`DiurnalOccurrence::Absent`] rather than being
/// skipped. The search owns its sample window; build a fresh one per
/// request.
///
/// The first occurrence is resolved by [`start`](Self::start), so invalid
/// input and ephemeris failures surface there. The first pull of the
/// iterator returns that stored result. After an error the iterator yields
/// `None`.
pub struct DiurnalSearch<'a> {
    window: DayWindow<'a>,
    request: DiurnalRequest,
    config: DiurnalConfig,
    phases: Vec<DiurnalPhase>,
    cursor: usize,
    /// Centre-day transit offset; outer `None` until resolved for the day.
    day_transit: Option<Option<f64>>,
    initial: DiurnalOccurrence,
    initial_pending: bool,
    failed: bool,
}

impl std::fmt::Debug for DiurnalSearch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiurnalSearch")
            .field("window", &self.window)
            .field("phases", &self.phases)
            .field("cursor", &self.cursor)
            .field("failed", &self.failed)
            .finish()
    }
}

impl<'a> DiurnalSearch<'a> {
    /// Validate the request, fill the window around the first day and
    /// resolve the first occurrence.
    pub fn start(
        ephemeris: &'a dyn Ephemeris,
        request: DiurnalRequest,
        config: DiurnalConfig,
    ) -> Result<Self, DiurnalError> {
        request.validate()?;
        config.validate()?;

        let window = DayWindow::new(
            ephemeris,
            request.profile,
            request.location,
            request.anchor_noon_jd(),
        )?;
        let mut search = Self {
            window,
            request,
            config,
            phases: request.phases.iter().collect(),
            cursor: 0,
            day_transit: None,
            // placeholder, overwritten below
            initial: DiurnalOccurrence::Absent {
                tag: BodyDiurnalPhase {
                    body: request.profile.body,
                    phase: DiurnalPhase::Transit,
                },
                day_noon_jd: request.anchor_noon_jd(),
            },
            initial_pending: true,
            failed: false,
        };
        search.initial = search.resolve_next()?;
        Ok(search)
    }

    /// The first occurrence, resolved at construction.
    pub fn initial(&self) -> &DiurnalOccurrence {
        &self.initial
    }

    pub fn request(&self) -> &DiurnalRequest {
        &self.request
    }

    /// Noon of the day currently being resolved.
    pub fn current_noon_jd(&self) -> f64 {
        self.window.center_noon_jd()
    }

    fn resolve_next(&mut self) -> Result<DiurnalOccurrence, DiurnalError> {
        if self.cursor == self.phases.len() {
            self.window.push()?;
            self.cursor = 0;
            self.day_transit = None;
        }
        let phase = self.phases[self.cursor];
        let occurrence = self.resolve_phase(phase)?;
        self.cursor += 1;
        Ok(occurrence)
    }

    fn centre_transit(&mut self) -> Result<Option<f64>, DiurnalError> {
        if let Some(cached) = self.day_transit {
            return Ok(cached);
        }
        let tau = central_transit_offset(
            &self.window,
            self.request.precision_rad,
            self.config.max_transit_iterations,
        )?;
        self.day_transit = Some(tau);
        Ok(tau)
    }

    fn resolve_phase(&mut self, phase: DiurnalPhase) -> Result<DiurnalOccurrence, DiurnalError> {
        let tag = BodyDiurnalPhase {
            body: self.request.profile.body,
            phase,
        };
        let noon = self.window.center_noon_jd();
        let absent = DiurnalOccurrence::Absent {
            tag,
            day_noon_jd: noon,
        };

        let Some(tau) = self.centre_transit()? else {
            return Ok(absent);
        };

        let offset = if phase.is_extreme() {
            let d = phase.direction();
            let precision = self.request.precision_rad;
            match approximate_extreme(&mut self.window, d, tau, precision, &self.config)? {
                Some(seed) => {
                    refine_extreme(&self.window, d, tau, seed, precision, &self.config)?
                        .map(|off| tau + off)
                }
                None => None,
            }
        } else {
            Some(tau)
        };

        Ok(match offset {
            Some(t) => DiurnalOccurrence::Event(DiurnalEvent { tag, jd: noon + t }),
            None => {
                log::debug!("{tag} absent on day of noon jd {noon:.5}");
                absent
            }
        })
    }
}

impl Iterator for DiurnalSearch<'_> {
    type Item = Result<DiurnalOccurrence, DiurnalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if self.initial_pending {
            self.initial_pending = false;
            return Some(Ok(self.initial));
        }
        match self.resolve_next() {
            Ok(occurrence) => Some(Ok(occurrence)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for DiurnalSearch<'_> {}

/// All occurrences of the requested phases over `days` consecutive days.
pub fn diurnal_events(
    ephemeris: &dyn Ephemeris,
    request: DiurnalRequest,
    days: usize,
) -> Result<Vec<DiurnalOccurrence>, DiurnalError> {
    if days == 0 {
        request.validate()?;
        return Ok(Vec::new());
    }
    let per_day = request.phases.len();
    DiurnalSearch::start(ephemeris, request, DiurnalConfig::default())?
        .take(days * per_day)
        .collect()
}

/// First present event at or after the request's date, scanning up to a
/// year ahead.
pub fn next_diurnal_event(
    ephemeris: &dyn Ephemeris,
    request: DiurnalRequest,
) -> Result<Option<DiurnalEvent>, DiurnalError> {
    let per_day = request.phases.len();
    for occurrence in DiurnalSearch::start(ephemeris, request, DiurnalConfig::default())?
        .take(NEXT_EVENT_SCAN_DAYS * per_day)
    {
        if let Some(event) = occurrence?.event() {
            return Ok(Some(*event));
        }
    }
    Ok(None)
}

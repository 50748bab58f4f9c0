//! Ephemeris query service and its analytic engine.
//!
//! This crate defines the [`Ephemeris`] contract consumed by the diurnal
//! search (apparent right ascension, declination, Greenwich hour angle,
//! nutation, obliquity and horizontal parallax of the Sun or Moon at one
//! instant) and the primary [`Engine`] that answers it from low-precision
//! analytic theories.

use std::error::Error;
use std::fmt::{Display, Formatter};

use dhruv_frames::{
    ARCSEC_TO_RAD, EquatorialCoords, Nutation, ecliptic_to_equatorial, normalize_rad, nutation,
    true_obliquity_rad,
};
use dhruv_time::{apparent_sidereal_time_rad, calendar_to_jd, gmst_rad, jd_to_centuries};

pub mod moon;
pub mod sun;

pub use moon::{EARTH_RADIUS_KM, LunarPosition, lunar_position};
pub use sun::{SolarPosition, solar_position};

/// Annual aberration constant, arcseconds.
const ABERRATION_ARCSEC: f64 = 20.4898;

/// Solar equatorial horizontal parallax at 1 AU, arcseconds.
const SOLAR_PARALLAX_ARCSEC: f64 = 8.794;

/// Engine configuration used at startup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Report apparent (nutation + aberration) positions and GAST.
    /// When false, positions are mean-of-date and sidereal time is GMST.
    pub apparent: bool,
    /// Reject epochs outside `[valid_from_year, valid_to_year]`.
    pub strict_validation: bool,
    pub valid_from_year: i32,
    pub valid_to_year: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            apparent: true,
            strict_validation: true,
            valid_from_year: 1800,
            valid_to_year: 2200,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<(), EngineError> {
        if self.valid_from_year >= self.valid_to_year {
            return Err(EngineError::InvalidConfig(
                "valid_from_year must be before valid_to_year",
            ));
        }
        Ok(())
    }
}

/// Bodies supported by the diurnal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// NAIF-style body code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Moon => 301,
        }
    }

    /// Convert a NAIF-style body code into a [`Body`].
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            10 => Some(Self::Sun),
            301 => Some(Self::Moon),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar quantities the service can report. All angles are radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Right ascension, [0, 2π).
    RightAscension,
    /// Declination, [−π/2, π/2].
    Declination,
    /// Greenwich hour angle (sidereal time − RA), [0, 2π).
    GreenwichHourAngle,
    /// Nutation in longitude Δψ.
    NutationLongitude,
    /// True obliquity of the ecliptic ε.
    TrueObliquity,
    /// Equatorial horizontal parallax.
    HorizontalParallax,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Self::RightAscension,
        Self::Declination,
        Self::GreenwichHourAngle,
        Self::NutationLongitude,
        Self::TrueObliquity,
        Self::HorizontalParallax,
    ];

    const fn index(self) -> usize {
        match self {
            Self::RightAscension => 0,
            Self::Declination => 1,
            Self::GreenwichHourAngle => 2,
            Self::NutationLongitude => 3,
            Self::TrueObliquity => 4,
            Self::HorizontalParallax => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::RightAscension => "right_ascension",
            Self::Declination => "declination",
            Self::GreenwichHourAngle => "greenwich_hour_angle",
            Self::NutationLongitude => "nutation_longitude",
            Self::TrueObliquity => "true_obliquity",
            Self::HorizontalParallax => "horizontal_parallax",
        }
    }
}

/// Compact set of requested quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuantitySet(u8);

impl QuantitySet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b11_1111);

    pub const fn with(self, q: Quantity) -> Self {
        Self(self.0 | (1 << q.index()))
    }

    pub const fn contains(self, q: Quantity) -> bool {
        self.0 & (1 << q.index()) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Quantity> {
        Quantity::ALL.into_iter().filter(move |q| self.contains(*q))
    }
}

impl FromIterator<Quantity> for QuantitySet {
    fn from_iter<I: IntoIterator<Item = Quantity>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

/// Single ephemeris request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub body: Body,
    pub epoch_jd: f64,
    pub quantities: QuantitySet,
}

impl Query {
    pub fn new(body: Body, epoch_jd: f64, quantities: QuantitySet) -> Self {
        Self {
            body,
            epoch_jd,
            quantities,
        }
    }
}

/// Values returned for one [`Query`]; only requested quantities are set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuantityValues {
    values: [Option<f64>; 6],
}

impl QuantityValues {
    pub fn get(&self, q: Quantity) -> Option<f64> {
        self.values[q.index()]
    }

    /// Like [`get`](Self::get) but a missing value is an error.
    pub fn require(&self, q: Quantity) -> Result<f64, EngineError> {
        self.get(q).ok_or(EngineError::MissingQuantity(q))
    }

    pub fn set(&mut self, q: Quantity, value: f64) {
        self.values[q.index()] = Some(value);
    }
}

/// Core engine errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    InvalidConfig(&'static str),
    InvalidQuery(&'static str),
    EpochOutOfRange { epoch_jd: f64 },
    MissingQuantity(Quantity),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            Self::EpochOutOfRange { epoch_jd } => write!(f, "epoch out of range: {epoch_jd}"),
            Self::MissingQuantity(q) => write!(f, "quantity not provided: {}", q.name()),
        }
    }
}

impl Error for EngineError {}

/// Source of apparent body quantities at a single instant.
///
/// The diurnal search only talks to this trait, so any implementation
/// (the analytic [`Engine`], a kernel-backed engine, a test double) can
/// drive it.
pub trait Ephemeris {
    fn evaluate(&self, query: &Query) -> Result<QuantityValues, EngineError>;
}

impl<T: Ephemeris + ?Sized> Ephemeris for &T {
    fn evaluate(&self, query: &Query) -> Result<QuantityValues, EngineError> {
        (**self).evaluate(query)
    }
}

/// Telemetry from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    pub evaluations: u32,
    pub cache_hits: u32,
}

#[derive(Debug, Clone, Copy)]
struct EclipticState {
    lon_rad: f64,
    lat_rad: f64,
    parallax_rad: f64,
}

/// Per-query memoization context.
///
/// Created at the start of each query, threaded through the derivation
/// chain (nutation → obliquity → ecliptic → equatorial → hour angle),
/// dropped at the end.
struct ComputationContext {
    t: f64,
    nutation: Option<Nutation>,
    obliquity: Option<f64>,
    ecliptic: Option<EclipticState>,
    equatorial: Option<EquatorialCoords>,
    evaluations: u32,
    cache_hits: u32,
}

impl ComputationContext {
    fn new(epoch_jd: f64) -> Self {
        Self {
            t: jd_to_centuries(epoch_jd),
            nutation: None,
            obliquity: None,
            ecliptic: None,
            equatorial: None,
            evaluations: 0,
            cache_hits: 0,
        }
    }

    fn stats(&self) -> QueryStats {
        QueryStats {
            evaluations: self.evaluations,
            cache_hits: self.cache_hits,
        }
    }
}

/// Analytic Sun/Moon engine.
///
/// `Engine` is [`Send`] + [`Sync`] and holds no mutable state; each query
/// creates its own short-lived [`ComputationContext`].
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    valid_from_jd: f64,
    valid_to_jd: f64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let valid_from_jd = calendar_to_jd(config.valid_from_year, 1, 1.0);
        let valid_to_jd = calendar_to_jd(config.valid_to_year + 1, 1, 1.0);
        Ok(Self {
            config,
            valid_from_jd,
            valid_to_jd,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a query and return telemetry alongside the values.
    pub fn evaluate_with_stats(
        &self,
        query: &Query,
    ) -> Result<(QuantityValues, QueryStats), EngineError> {
        self.check_epoch(query.epoch_jd)?;
        let mut ctx = ComputationContext::new(query.epoch_jd);
        let mut out = QuantityValues::default();

        for q in query.quantities.iter() {
            let value = match q {
                Quantity::RightAscension => self.equatorial(query.body, &mut ctx).ra_rad,
                Quantity::Declination => self.equatorial(query.body, &mut ctx).dec_rad,
                Quantity::GreenwichHourAngle => {
                    let gst = self.sidereal_time(query.epoch_jd, &mut ctx);
                    let ra = self.equatorial(query.body, &mut ctx).ra_rad;
                    normalize_rad(gst - ra)
                }
                Quantity::NutationLongitude => self.nutation_in_use(&mut ctx).dpsi_rad,
                Quantity::TrueObliquity => self.obliquity(&mut ctx),
                Quantity::HorizontalParallax => self.ecliptic(query.body, &mut ctx).parallax_rad,
            };
            out.set(q, value);
        }

        log::trace!(
            "evaluated {} at jd {:.6}: {} nodes, {} cache hits",
            query.body,
            query.epoch_jd,
            ctx.evaluations,
            ctx.cache_hits
        );
        Ok((out, ctx.stats()))
    }

    fn check_epoch(&self, epoch_jd: f64) -> Result<(), EngineError> {
        if !epoch_jd.is_finite() {
            return Err(EngineError::InvalidQuery("epoch_jd must be finite"));
        }
        if self.config.strict_validation
            && !(self.valid_from_jd..self.valid_to_jd).contains(&epoch_jd)
        {
            return Err(EngineError::EpochOutOfRange { epoch_jd });
        }
        Ok(())
    }

    /// Nutation applied to positions; zero in mean-of-date mode.
    fn nutation_in_use(&self, ctx: &mut ComputationContext) -> Nutation {
        if let Some(n) = ctx.nutation {
            ctx.cache_hits += 1;
            return n;
        }
        let n = if self.config.apparent {
            nutation(ctx.t)
        } else {
            Nutation {
                dpsi_rad: 0.0,
                deps_rad: 0.0,
            }
        };
        ctx.evaluations += 1;
        ctx.nutation = Some(n);
        n
    }

    fn obliquity(&self, ctx: &mut ComputationContext) -> f64 {
        if let Some(eps) = ctx.obliquity {
            ctx.cache_hits += 1;
            return eps;
        }
        let deps = self.nutation_in_use(ctx).deps_rad;
        let eps = true_obliquity_rad(ctx.t, deps);
        ctx.evaluations += 1;
        ctx.obliquity = Some(eps);
        eps
    }

    fn ecliptic(&self, body: Body, ctx: &mut ComputationContext) -> EclipticState {
        if let Some(e) = ctx.ecliptic {
            ctx.cache_hits += 1;
            return e;
        }
        let dpsi = self.nutation_in_use(ctx).dpsi_rad;
        let state = match body {
            Body::Sun => {
                let p = solar_position(ctx.t);
                let aberration = if self.config.apparent {
                    ABERRATION_ARCSEC * ARCSEC_TO_RAD / p.distance_au
                } else {
                    0.0
                };
                EclipticState {
                    lon_rad: normalize_rad(p.lon_rad + dpsi - aberration),
                    lat_rad: 0.0,
                    parallax_rad: SOLAR_PARALLAX_ARCSEC * ARCSEC_TO_RAD / p.distance_au,
                }
            }
            Body::Moon => {
                let p = lunar_position(ctx.t);
                EclipticState {
                    lon_rad: normalize_rad(p.lon_rad + dpsi),
                    lat_rad: p.lat_rad,
                    parallax_rad: p.horizontal_parallax_rad(),
                }
            }
        };
        ctx.evaluations += 1;
        ctx.ecliptic = Some(state);
        state
    }

    fn equatorial(&self, body: Body, ctx: &mut ComputationContext) -> EquatorialCoords {
        if let Some(eq) = ctx.equatorial {
            ctx.cache_hits += 1;
            return eq;
        }
        let ecl = self.ecliptic(body, ctx);
        let eps = self.obliquity(ctx);
        let eq = ecliptic_to_equatorial(ecl.lon_rad, ecl.lat_rad, eps);
        ctx.evaluations += 1;
        ctx.equatorial = Some(eq);
        eq
    }

    fn sidereal_time(&self, epoch_jd: f64, ctx: &mut ComputationContext) -> f64 {
        if self.config.apparent {
            let dpsi = self.nutation_in_use(ctx).dpsi_rad;
            let eps = self.obliquity(ctx);
            apparent_sidereal_time_rad(epoch_jd, dpsi, eps)
        } else {
            gmst_rad(epoch_jd)
        }
    }
}

impl Ephemeris for Engine {
    fn evaluate(&self, query: &Query) -> Result<QuantityValues, EngineError> {
        self.evaluate_with_stats(query).map(|(values, _)| values)
    }
}

use std::fmt::Display;

use clap::{Parser, Subcommand, ValueEnum};
use dhruv_core::{Body, Engine, EngineConfig, Quantity, QuantitySet, Query};
use dhruv_diurnal::{
    BodyProfile, DiurnalConfig, DiurnalOccurrence, DiurnalPhase, DiurnalRequest, DiurnalSearch,
    GeoCoords, HorizonRule, PhaseSet,
};
use dhruv_frames::{nutation, true_obliquity_rad};
use dhruv_time::{CivilDate, UtcTime, apparent_sidereal_time_rad, gmst_rad, jd_to_centuries};

#[derive(Parser)]
#[command(name = "dhruv", about = "Sun and Moon transit, rise and set")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Accept epochs outside 1800-2200
    #[arg(long, global = true)]
    lax: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transit, rise and set for consecutive days
    Diurnal {
        #[arg(long, value_enum, default_value = "sun")]
        body: BodyArg,
        /// Civil date of the first day (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Geodetic latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Number of days
        #[arg(long, default_value = "1")]
        days: usize,
        /// Comma-separated subset of rise,transit,set
        #[arg(long, value_enum, value_delimiter = ',', default_value = "rise,transit,set")]
        phases: Vec<PhaseArg>,
        /// Stopping precision in arcseconds
        #[arg(long, default_value = "2")]
        precision_arcsec: f64,
        /// Standard altitude for the Sun
        #[arg(long, value_enum, default_value = "standard")]
        horizon: HorizonArg,
    },
    /// Raw service quantities for one instant
    Quantities {
        #[arg(long, value_enum)]
        body: BodyArg,
        /// Julian Date
        #[arg(long)]
        jd: f64,
    },
    /// Mean and apparent Greenwich sidereal time
    Sidereal {
        /// Julian Date
        #[arg(long)]
        jd: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BodyArg {
    Sun,
    Moon,
}

impl From<BodyArg> for Body {
    fn from(b: BodyArg) -> Self {
        match b {
            BodyArg::Sun => Body::Sun,
            BodyArg::Moon => Body::Moon,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PhaseArg {
    Rise,
    Transit,
    Set,
}

impl From<PhaseArg> for DiurnalPhase {
    fn from(p: PhaseArg) -> Self {
        match p {
            PhaseArg::Rise => DiurnalPhase::Rising,
            PhaseArg::Transit => DiurnalPhase::Transit,
            PhaseArg::Set => DiurnalPhase::Setting,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HorizonArg {
    Standard,
    Civil,
    Nautical,
    Astronomical,
}

impl HorizonArg {
    fn rule(self) -> HorizonRule {
        match self {
            Self::Standard => HorizonRule::SUN_STANDARD,
            Self::Civil => HorizonRule::CIVIL_TWILIGHT,
            Self::Nautical => HorizonRule::NAUTICAL_TWILIGHT,
            Self::Astronomical => HorizonRule::ASTRONOMICAL_TWILIGHT,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn load_engine(lax: bool) -> Engine {
    let config = EngineConfig {
        strict_validation: !lax,
        ..EngineConfig::default()
    };
    or_exit(Engine::new(config))
}

fn format_jd(jd: f64) -> String {
    match UtcTime::from_jd(jd) {
        Ok(utc) => format!("{utc}  (JD {jd:.6})"),
        Err(_) => format!("JD {jd:.6}"),
    }
}

fn hms(rad: f64) -> String {
    let hours = rad.to_degrees() / 15.0;
    let h = hours.floor();
    let m = ((hours - h) * 60.0).floor();
    let s = ((hours - h) * 60.0 - m) * 60.0;
    format!("{h:02}h{m:02}m{s:06.3}s")
}

#[allow(clippy::too_many_arguments)]
fn run_diurnal(
    engine: &Engine,
    body: BodyArg,
    date: &str,
    lat: f64,
    lon: f64,
    days: usize,
    phases: &[PhaseArg],
    precision_arcsec: f64,
    horizon: HorizonArg,
) {
    let date: CivilDate = or_exit(date.parse());
    let location = or_exit(GeoCoords::from_degrees(lat, lon));
    let profile = match body {
        BodyArg::Sun => BodyProfile::sun_with_horizon(horizon.rule()),
        BodyArg::Moon => {
            if horizon != HorizonArg::Standard {
                log::warn!("--horizon only applies to the Sun; using the lunar parallax rule");
            }
            BodyProfile::moon()
        }
    };
    let phases: PhaseSet = phases.iter().copied().map(DiurnalPhase::from).collect();
    let request = DiurnalRequest::new(profile, date, location)
        .with_phases(phases)
        .with_precision_arcsec(precision_arcsec);

    let search = or_exit(DiurnalSearch::start(engine, request, DiurnalConfig::default()));

    println!(
        "{} at {:.4}°N, {:.4}°E from {date}:\n",
        Body::from(body),
        lat,
        lon
    );
    for occurrence in search.take(days * phases.len()) {
        match or_exit(occurrence) {
            DiurnalOccurrence::Event(event) => {
                println!("  {:14} {}", event.tag.to_string(), format_jd(event.jd));
            }
            DiurnalOccurrence::Absent { tag, day_noon_jd } => {
                let day = UtcTime::from_jd(day_noon_jd)
                    .map(|u| u.date().to_string())
                    .unwrap_or_else(|_| format!("JD {day_noon_jd:.1}"));
                println!("  {:14} none on {day}", tag.to_string());
            }
        }
    }
}

fn run_quantities(engine: &Engine, body: BodyArg, jd: f64) {
    let query = Query::new(body.into(), jd, QuantitySet::ALL);
    let (values, stats) = or_exit(engine.evaluate_with_stats(&query));
    println!("{} at {}:\n", Body::from(body), format_jd(jd));
    for q in Quantity::ALL {
        if let Some(v) = values.get(q) {
            println!("  {:22} {:>14.8}°", q.name(), v.to_degrees());
        }
    }
    println!(
        "\n  ({} nodes evaluated, {} cache hits)",
        stats.evaluations, stats.cache_hits
    );
}

fn run_sidereal(jd: f64) {
    let t = jd_to_centuries(jd);
    let n = nutation(t);
    let eps = true_obliquity_rad(t, n.deps_rad);
    let gmst = gmst_rad(jd);
    let gast = apparent_sidereal_time_rad(jd, n.dpsi_rad, eps);
    println!("{}", format_jd(jd));
    println!("  GMST  {}  ({:.8}°)", hms(gmst), gmst.to_degrees());
    println!("  GAST  {}  ({:.8}°)", hms(gast), gast.to_degrees());
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Diurnal {
            body,
            date,
            lat,
            lon,
            days,
            phases,
            precision_arcsec,
            horizon,
        } => {
            let engine = load_engine(cli.lax);
            run_diurnal(
                &engine,
                body,
                &date,
                lat,
                lon,
                days,
                &phases,
                precision_arcsec,
                horizon,
            );
        }

        Commands::Quantities { body, jd } => {
            let engine = load_engine(cli.lax);
            run_quantities(&engine, body, jd);
        }

        Commands::Sidereal { jd } => run_sidereal(jd),
    }
}

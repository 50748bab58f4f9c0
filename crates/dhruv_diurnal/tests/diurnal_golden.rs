//! Golden-value tests for solar transit, sunrise and sunset.
//!
//! Reference instants are almanac values (sunrise/sunset for the upper limb
//! with 34′ refraction); the analytic engine needs no kernel files.

use dhruv_core::{Engine, EngineConfig};
use dhruv_diurnal::{
    BodyProfile, DiurnalConfig, DiurnalOccurrence, DiurnalPhase, DiurnalRequest, DiurnalSearch,
    GeoCoords, diurnal_events,
};
use dhruv_time::CivilDate;

const MINUTE: f64 = 1.0 / 1440.0;

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).unwrap()
}

fn sun_request(date: (i32, u32, u32), lat: f64, lon: f64) -> DiurnalRequest {
    DiurnalRequest::new(
        BodyProfile::sun(),
        CivilDate::new(date.0, date.1, date.2).unwrap(),
        GeoCoords::from_degrees(lat, lon).unwrap(),
    )
}

/// Hours UTC of a JD (for assertions).
fn utc_hours(jd: f64) -> f64 {
    (jd + 0.5).rem_euclid(1.0) * 24.0
}

fn utc_minutes(jd: f64) -> f64 {
    utc_hours(jd) * 60.0
}

/// (rise, transit, set) of the first day, all present.
fn first_day(engine: &Engine, request: DiurnalRequest) -> (f64, f64, f64) {
    let day = diurnal_events(engine, request, 1).unwrap();
    let jd = |phase: DiurnalPhase| {
        day.iter()
            .find(|o| o.phase() == phase)
            .and_then(DiurnalOccurrence::jd)
            .unwrap_or_else(|| panic!("{phase} absent: {day:?}"))
    };
    (
        jd(DiurnalPhase::Rising),
        jd(DiurnalPhase::Transit),
        jd(DiurnalPhase::Setting),
    )
}

#[test]
fn equator_equinox_six_hours() {
    let engine = engine();
    let (rise, transit, set) = first_day(&engine, sun_request((2024, 3, 20), 0.0, 0.0));

    // equation of time is about −7.5 min on the March equinox
    let transit_h = utc_hours(transit);
    assert!(
        (transit_h - 12.125).abs() < 3.0 / 60.0,
        "transit = {transit_h:.3}h UTC"
    );

    // 90°50′ of hour angle, about 6h03m
    let expected = 363.3 * MINUTE;
    assert!(
        (transit - rise - expected).abs() < 4.0 * MINUTE,
        "rise offset = {:.2} min",
        (transit - rise) / MINUTE
    );
    assert!(
        (set - transit - expected).abs() < 4.0 * MINUTE,
        "set offset = {:.2} min",
        (set - transit) / MINUTE
    );
}

#[test]
fn mid_latitude_solstice_day_length() {
    let engine = engine();
    let (rise, transit, set) = first_day(&engine, sun_request((2024, 6, 21), 45.0, 0.0));

    // cos H0 = (sin h0 − sin φ sin δ)/(cos φ cos δ), δ = 23.44°: H0 = 7h48.5m
    let expected = 468.5 * MINUTE;
    assert!(
        (set - transit - expected).abs() < 2.0 * MINUTE,
        "set offset = {:.2} min",
        (set - transit) / MINUTE
    );
    assert!(
        (transit - rise - expected).abs() < 2.0 * MINUTE,
        "rise offset = {:.2} min",
        (transit - rise) / MINUTE
    );
    // declination is stationary at the solstice
    assert!(((set - transit) - (transit - rise)).abs() < 0.5 * MINUTE);
}

#[test]
fn turin_solstices_match_almanac() {
    // Turin, 45.0703°N 7.6869°E. NOAA Solar Calculator, upper limb with
    // 34′ refraction:
    //   2024-06-21  rise 03:42:19 UTC  set 19:20:01 UTC
    //   2024-12-21  rise 07:04:50 UTC  set 15:50:17 UTC
    // Both this engine and the calculator are low-precision solar theories
    // good to about half a minute of rise/set time at this latitude.
    let engine = engine();
    let cases = [
        ((2024, 6, 21), 3.0 * 60.0 + 42.0 + 19.0 / 60.0, 19.0 * 60.0 + 20.0 + 1.0 / 60.0),
        ((2024, 12, 21), 7.0 * 60.0 + 4.0 + 50.0 / 60.0, 15.0 * 60.0 + 50.0 + 17.0 / 60.0),
    ];
    for (date, rise_ref, set_ref) in cases {
        let (rise, transit, set) = first_day(&engine, sun_request(date, 45.0703, 7.6869));
        let rise_min = utc_minutes(rise);
        let set_min = utc_minutes(set);
        assert!(
            (rise_min - rise_ref).abs() < 1.0,
            "{date:?} sunrise {rise_min:.2} min UTC, almanac {rise_ref:.2}"
        );
        assert!(
            (set_min - set_ref).abs() < 1.0,
            "{date:?} sunset {set_min:.2} min UTC, almanac {set_ref:.2}"
        );
        assert!(rise < transit && transit < set);
    }
}

#[test]
fn new_delhi_equinox() {
    let engine = engine();
    let (rise, transit, set) = first_day(&engine, sun_request((2024, 3, 20), 28.6139, 77.209));

    // almanac: sunrise 06:24 IST, sunset 18:31 IST
    let rise_h = utc_hours(rise);
    let set_h = utc_hours(set);
    assert!((rise_h - 0.9).abs() < 5.0 / 60.0, "sunrise = {rise_h:.3}h UTC");
    assert!((set_h - 13.02).abs() < 5.0 / 60.0, "sunset = {set_h:.3}h UTC");
    assert!(rise < transit && transit < set);
}

#[test]
fn refined_altitude_meets_requested_precision() {
    // one arcsecond of altitude is a few hundredths of a second of time at
    // these rates; two requests differing only in precision agree closely
    let engine = engine();
    let coarse = sun_request((2024, 6, 21), 45.0, 0.0).with_precision_arcsec(10.0);
    let fine = sun_request((2024, 6, 21), 45.0, 0.0).with_precision_arcsec(0.1);
    let (r1, t1, s1) = first_day(&engine, coarse);
    let (r2, t2, s2) = first_day(&engine, fine);
    let tol = 10.0 / 86_400.0;
    assert!((r1 - r2).abs() < tol);
    assert!((t1 - t2).abs() < tol);
    assert!((s1 - s2).abs() < tol);
}

#[test]
fn resolving_twice_is_identical() {
    let engine = engine();
    let request = sun_request((2024, 11, 3), -33.87, 151.21);
    let a = diurnal_events(&engine, request, 10).unwrap();
    let b = diurnal_events(&engine, request, 10).unwrap();
    assert_eq!(a, b);
}

#[test]
fn consecutive_days_advance_by_one_day() {
    let engine = engine();
    let request = sun_request((2024, 9, 1), 51.48, 0.0);
    let search = DiurnalSearch::start(&engine, request, DiurnalConfig::default()).unwrap();
    let transits: Vec<f64> = search
        .take(3 * 7)
        .map(Result::unwrap)
        .filter(|o| o.phase() == DiurnalPhase::Transit)
        .filter_map(|o| o.jd())
        .collect();
    assert_eq!(transits.len(), 7);
    for pair in transits.windows(2) {
        let gap = pair[1] - pair[0];
        // equation of time changes by well under a minute per day
        assert!((gap - 1.0).abs() < MINUTE, "gap = {gap}");
    }
}

#[test]
fn twilight_horizon_widens_the_day() {
    let engine = engine();
    let request = sun_request((2024, 3, 20), 40.0, 0.0);
    let civil = DiurnalRequest {
        profile: BodyProfile::sun_with_horizon(dhruv_diurnal::HorizonRule::CIVIL_TWILIGHT),
        ..request
    };
    let (r0, _, s0) = first_day(&engine, request);
    let (r1, _, s1) = first_day(&engine, civil);
    // about 26 minutes at 40° on the equinox
    assert!(r1 < r0 - 20.0 * MINUTE && r1 > r0 - 35.0 * MINUTE);
    assert!(s1 > s0 + 20.0 * MINUTE && s1 < s0 + 35.0 * MINUTE);
}

use dhruv_core::{Engine, EngineConfig};
use dhruv_diurnal::{
    BodyProfile, DiurnalOccurrence, DiurnalPhase, DiurnalRequest, GeoCoords, diurnal_events,
};
use dhruv_time::CivilDate;
use proptest::prelude::*;

/// Latitudes where the Sun rises and sets every day of the year.
fn mid_latitude_strategy() -> impl Strategy<Value = f64> {
    -55.0..55.0
}

fn longitude_strategy() -> impl Strategy<Value = f64> {
    -180.0..180.0
}

fn date_strategy() -> impl Strategy<Value = (i32, u32, u32)> {
    (1900..2100i32, 1..=12u32, 1..=28u32)
}

fn request(profile: BodyProfile, date: (i32, u32, u32), lat: f64, lon: f64) -> DiurnalRequest {
    DiurnalRequest::new(
        profile,
        CivilDate::new(date.0, date.1, date.2).unwrap(),
        GeoCoords::from_degrees(lat, lon).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// One rise, one transit and one set per day, in that order, with the
    /// transit attributed to the day whose local noon it is nearest.
    #[test]
    fn sun_phases_are_unique_and_ordered(
        lat in mid_latitude_strategy(),
        lon in longitude_strategy(),
        date in date_strategy(),
    ) {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let req = request(BodyProfile::sun(), date, lat, lon);
        let anchor = req.anchor_noon_jd();
        let events = diurnal_events(&engine, req, 2).unwrap();
        prop_assert_eq!(events.len(), 6);

        for (k, day) in events.chunks(3).enumerate() {
            let phases: Vec<DiurnalPhase> = day.iter().map(DiurnalOccurrence::phase).collect();
            prop_assert_eq!(phases, DiurnalPhase::ALL.to_vec());

            let jds: Vec<f64> = day.iter().filter_map(DiurnalOccurrence::jd).collect();
            prop_assert_eq!(jds.len(), 3, "absent phase at ({}, {}) on {:?}: {:?}", lat, lon, date, day);
            prop_assert!(jds[0] < jds[1] && jds[1] < jds[2], "{:?}", jds);

            let noon = anchor + k as f64;
            prop_assert!((jds[1] - noon).abs() < 0.5);
        }
    }

    /// Whenever the Moon transits on a day it also rises before and sets
    /// after that transit.
    #[test]
    fn moon_rise_and_set_bracket_transit(
        lat in -45.0..45.0f64,
        lon in longitude_strategy(),
        date in date_strategy(),
    ) {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let req = request(BodyProfile::moon(), date, lat, lon);
        let events = diurnal_events(&engine, req, 3).unwrap();

        for day in events.chunks(3) {
            if day[1].is_absent() {
                prop_assert!(day.iter().all(DiurnalOccurrence::is_absent));
                continue;
            }
            let jds: Vec<f64> = day.iter().filter_map(DiurnalOccurrence::jd).collect();
            prop_assert_eq!(jds.len(), 3, "{:?}", day);
            prop_assert!(jds[0] < jds[1] && jds[1] < jds[2], "{:?}", jds);
        }
    }
}

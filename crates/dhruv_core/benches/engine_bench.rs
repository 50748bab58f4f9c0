use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dhruv_core::{Body, Engine, EngineConfig, Ephemeris, QuantitySet, Query};

fn engine_bench(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).expect("default config is valid");

    let sun = Query::new(Body::Sun, 2_460_000.5, QuantitySet::ALL);
    c.bench_function("evaluate_sun_all", |b| {
        b.iter(|| engine.evaluate(black_box(&sun)))
    });

    let moon = Query::new(Body::Moon, 2_460_000.5, QuantitySet::ALL);
    c.bench_function("evaluate_moon_all", |b| {
        b.iter(|| engine.evaluate(black_box(&moon)))
    });
}

criterion_group!(benches, engine_bench);
criterion_main!(benches);

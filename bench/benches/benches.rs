use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata_core::nutrients::LEGACY_RESUPPLY_FRACTION;
use strata_core::{
    Climate, LayeredRockData, Noise2D, NutrientLedger, NutrientType, Simplex2D, SurfaceResolver,
    SurfaceState,
};

const SIZE: i32 = 128;
const SEED: u64 = 9_128_639_581_632;

fn bench_variant_noise(c: &mut Criterion) {
    c.bench_function("Simplex2D 2 octaves, 128x128 columns", |b| {
        let noise = Simplex2D::new(SEED, 0.015, 0.5, 2);
        b.iter(|| {
            let mut sum = 0.0;
            for z in 0..SIZE {
                for x in 0..SIZE {
                    sum += noise.noise_at(x, z);
                }
            }
            black_box(sum)
        })
    });
}

fn bench_resolve_states(c: &mut Criterion) {
    let resolver = SurfaceResolver::default();
    let rocks = LayeredRockData::default();
    let mut group = c.benchmark_group("resolve 128x128");
    for state in SurfaceState::ALL {
        group.bench_function(state.name(), |b| {
            b.iter(|| {
                for z in 0..SIZE {
                    for x in 0..SIZE {
                        let climate = Climate::new(x as f32 * 0.3 - 10.0, z as f32 * 4.0, x % 2 == 0);
                        black_box(resolver.resolve(state, &rocks, x, 62, z, climate));
                    }
                }
            })
        });
    }
    group.finish();
}

fn bench_consume_resupply(c: &mut Criterion) {
    c.bench_function("NutrientLedger consume + resupply x1000", |b| {
        b.iter(|| {
            let mut ledger = NutrientLedger::with_levels(1.0, 0.5, 0.25);
            for i in 0..1000 {
                let nutrient = NutrientType::VALUES[i % 3];
                black_box(ledger.consume_and_resupply(nutrient, 0.01, LEGACY_RESUPPLY_FRACTION));
            }
            ledger
        })
    });
}

criterion_group!(
    strata_benchmarks,
    bench_variant_noise,
    bench_resolve_states,
    bench_consume_resupply
);
criterion_main!(strata_benchmarks);

use bdp_tracks::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn genes(count: usize) -> Vec<Feature> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    (0..count)
        .map(|i| {
            let start = rng.gen_range(0..1_000_000);
            Feature::gene(format!("G{}", i), start, start + 10_000, Strand::Forward).unwrap()
        })
        .collect()
}

fn signal(count: usize) -> Vec<SignalSample> {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    (0..count as PosType)
        .map(|p| SignalSample::new(p * 10, rng.gen_range(0.0..5.0)))
        .collect()
}

fn bench_jitter(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_jitter");
    let config = JitterConfig::default();
    for count in [10, 100, 500] {
        let features = genes(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &features, |b, features| {
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            b.iter(|| {
                assign_jitter(black_box(features), 1_000_000.0, None, &config, &mut rng).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_signal(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_signal");
    for count in [1_000, 50_000, 500_000] {
        let samples = signal(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &samples, |b, samples| {
            b.iter(|| prepare_signal(black_box(samples), SignalRendering::Binned).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_jitter, bench_signal);
criterion_main!(benches);

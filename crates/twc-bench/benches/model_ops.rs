//! Criterion benchmarks for full coupled timesteps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use twc_bench::{reference_profile, stress_profile};
use twc_engine::Model;

fn bench_step_10k(c: &mut Criterion) {
    let mut model = Model::new(reference_profile(1)).unwrap();

    c.bench_function("step_10k", |b| {
        b.iter(|| {
            // Rewind so the single configured timestep can run again.
            model.initialise().unwrap();
            let metrics = model.step().unwrap();
            black_box(metrics);
        });
    });
}

fn bench_step_100k(c: &mut Criterion) {
    let mut model = Model::new(stress_profile(1)).unwrap();

    c.bench_function("step_100k", |b| {
        b.iter(|| {
            model.initialise().unwrap();
            let metrics = model.step().unwrap();
            black_box(metrics);
        });
    });
}

fn bench_run_100_steps_10k(c: &mut Criterion) {
    c.bench_function("run_100_steps_10k", |b| {
        b.iter(|| {
            let mut model = Model::new(reference_profile(100)).unwrap();
            let steps = model.run().unwrap();
            black_box(steps);
        });
    });
}

criterion_group!(benches, bench_step_10k, bench_step_100k, bench_run_100_steps_10k);
criterion_main!(benches);

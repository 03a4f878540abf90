//! Criterion benchmarks for energy evaluation and full annealing runs.

use charge_anneal::anneal::{AnnealConfig, AnnealRunner, EnergyMode};
use charge_anneal::random::create_rng;
use charge_anneal::system::{energy_delta, system_energy, ChargeRange, ChargeSign, NodeGenerator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;

// ===========================================================================
// Energy evaluation
// ===========================================================================

fn bench_system_energy(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_energy");
    let generator = NodeGenerator::new(100.0, ChargeRange::default(), ChargeSign::Mixed);

    for &n in &[10usize, 20, 100, 500] {
        let config = generator.generate(n, &mut create_rng(42));
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, cfg| {
            b.iter(|| black_box(system_energy(black_box(cfg))))
        });
    }
    group.finish();
}

fn bench_energy_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("energy_delta");
    let generator = NodeGenerator::new(100.0, ChargeRange::default(), ChargeSign::Mixed);

    for &n in &[10usize, 20, 100, 500] {
        let config = generator.generate(n, &mut create_rng(42));
        let target = DVec3::new(1.0, 2.0, 3.0);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, cfg| {
            b.iter(|| black_box(energy_delta(black_box(cfg), 0, target)))
        });
    }
    group.finish();
}

// ===========================================================================
// Full runs
// ===========================================================================

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);

    for mode in [EnergyMode::Full, EnergyMode::Incremental] {
        for &n in &[10usize, 20] {
            let config = AnnealConfig::default()
                .with_node_count(n)
                .with_initial_temperature(60.0)
                .with_drop_rate(1.0)
                .with_iterations_per_temperature(40)
                .with_convergence_threshold(0.0)
                .with_energy_mode(mode)
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), n),
                &config,
                |b, cfg| {
                    b.iter(|| {
                        let result = AnnealRunner::run(black_box(cfg));
                        black_box(result)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_system_energy, bench_energy_delta, bench_anneal);
criterion_main!(benches);

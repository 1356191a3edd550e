//! Benchmark for automaton stepping and full generation.
//!
//! Run with: cargo bench --package conway_terrain --bench automaton_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use conway_terrain::{
    GeneratorConfig, Grid, GridCoord, PlacementLog, SeededGenerator, StepRule, WorldBuilder,
};

/// Builder that discards everything.
struct NullBuilder;

impl WorldBuilder for NullBuilder {
    fn place_floor(&mut self, coord: GridCoord) {
        black_box(coord);
    }

    fn place_wall(&mut self, coord: GridCoord) {
        black_box(coord);
    }

    fn place_spawn(&mut self, coord: GridCoord) {
        black_box(coord);
    }
}

fn benchmark_grid_construction(c: &mut Criterion) {
    c.bench_function("grid_256x256_construction", |b| {
        b.iter(|| black_box(Grid::<bool>::new(black_box(256), black_box(256))))
    });
}

fn benchmark_single_step(c: &mut Criterion) {
    let config = GeneratorConfig::canonical(256, 256, 1).with_seed(42);
    let generator = SeededGenerator::seeded(&config).unwrap();

    let mut group = c.benchmark_group("automaton_step");
    group.throughput(Throughput::Elements(256 * 256));

    group.bench_function("step_256x256", |b| {
        b.iter_batched(
            || generator.clone(),
            |mut gen| {
                gen.step(StepRule::CANONICAL);
                black_box(gen)
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn benchmark_gap_fill(c: &mut Criterion) {
    let config = GeneratorConfig::canonical(256, 256, 2).with_seed(42);
    let mut generator = SeededGenerator::seeded(&config).unwrap();
    generator.run_automata(2, StepRule::CANONICAL);

    c.bench_function("fill_gaps_256x256_4_passes", |b| {
        b.iter_batched(
            || generator.clone(),
            |mut gen| {
                gen.fill_gaps(4, 4);
                black_box(gen)
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn benchmark_full_generation(c: &mut Criterion) {
    let config = GeneratorConfig::canonical(128, 128, 2).with_seed(7);
    let plan = config.plan();

    c.bench_function("generate_128x128_null_builder", |b| {
        b.iter(|| {
            let mut gen = SeededGenerator::seeded(&config).unwrap();
            black_box(gen.generate(&plan, &mut NullBuilder).unwrap())
        });
    });

    c.bench_function("generate_128x128_placement_log", |b| {
        b.iter(|| {
            let mut gen = SeededGenerator::seeded(&config).unwrap();
            let mut log = PlacementLog::new();
            gen.generate(&plan, &mut log).unwrap();
            black_box(log)
        });
    });
}

criterion_group!(
    benches,
    benchmark_grid_construction,
    benchmark_single_step,
    benchmark_gap_fill,
    benchmark_full_generation
);
criterion_main!(benches);

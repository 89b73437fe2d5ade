//! Parse, build, and particle tick throughput.
#![allow(missing_docs)]
#![allow(unused_results)]

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use molscene::geometry::GeometryBuilder;
use molscene::molecule::{self, StructureRecord};
use molscene::options::{GeometryOptions, ParticleOptions};
use molscene::particles::ParticleField;

/// Zig-zag carbon chain with alternating bond orders.
fn chain_json(atoms: usize) -> String {
    let elements: Vec<u32> = (0..atoms)
        .map(|i| if i % 3 == 0 { 8 } else { 6 })
        .collect();
    let x: Vec<f32> = (0..atoms).map(|i| i as f32 * 1.3).collect();
    let y: Vec<f32> = (0..atoms)
        .map(|i| if i % 2 == 0 { 0.0 } else { 0.8 })
        .collect();
    let z: Vec<f32> = (0..atoms).map(|i| (i as f32 * 0.7).sin()).collect();
    let aid1: Vec<usize> = (1..atoms).collect();
    let aid2: Vec<usize> = (2..=atoms).collect();
    let order: Vec<u32> = (1..atoms).map(|i| (i % 3 + 1) as u32).collect();

    serde_json::json!({
        "atoms": {"element": elements},
        "coords": [{"conformers": [{"x": x, "y": y, "z": z}]}],
        "bonds": {"aid1": aid1, "aid2": aid2, "order": order},
    })
    .to_string()
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for atoms in [20, 200, 2000] {
        let json = chain_json(atoms);
        let record = StructureRecord::from_json(&json).unwrap();
        group.bench_function(format!("{atoms}_atoms"), |b| {
            b.iter(|| black_box(molecule::parse(black_box(&record))));
        });
    }
    group.finish();
}

fn build_benchmark(c: &mut Criterion) {
    let builder = GeometryBuilder::new(GeometryOptions::default());
    let mut group = c.benchmark_group("build");
    for atoms in [20, 200, 2000] {
        let molecule = molecule::parse_json(&chain_json(atoms)).unwrap();
        group.bench_function(format!("{atoms}_atoms"), |b| {
            b.iter(|| black_box(builder.build(black_box(&molecule))));
        });
    }
    group.finish();
}

fn particle_tick_benchmark(c: &mut Criterion) {
    let mut free = ParticleField::with_seed(ParticleOptions::default(), 3);
    let mut elapsed = Duration::ZERO;
    c.bench_function("particle_tick_free", |b| {
        b.iter(|| {
            elapsed += Duration::from_millis(16);
            free.tick(Duration::from_millis(16), elapsed);
        });
    });

    let options = ParticleOptions {
        hide_delay_ms: u64::MAX,
        ..ParticleOptions::default()
    };
    let mut converging = ParticleField::with_seed(options, 3);
    converging.converge(Vec3::ZERO, 3.0);
    c.bench_function("particle_tick_converging", |b| {
        b.iter(|| converging.tick(Duration::from_millis(16), Duration::ZERO));
    });
}

criterion_group!(
    benches,
    parse_benchmark,
    build_benchmark,
    particle_tick_benchmark
);
criterion_main!(benches);

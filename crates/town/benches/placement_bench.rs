//! Criterion benchmarks for the placement rules.
//!
//! Benchmarks:
//!   - overlay recompute for a pending cottage next to a 20x20 block of
//!     committed cottages
//!   - full validation of one candidate position
//!   - moving a pending footprint by one cell
//!
//! Run with: cargo bench -p town --bench placement_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use town::catalog::Catalogs;
use town::grid::PendingHandle;
use town::pending::PlacementTarget;
use town::rotation::Rotation;
use town::town::Town;

// ---------------------------------------------------------------------------
// Helper: a settled town with one pending cottage
// ---------------------------------------------------------------------------

fn settled_town() -> (Town, Catalogs, PendingHandle) {
    let catalogs = Catalogs::builtin().expect("built-in catalog");
    let cottage = catalogs
        .building_types
        .lookup("cottage")
        .expect("cottage type")
        .clone();
    let mut town = Town::new("bench", &catalogs);
    for i in 0..20 {
        for j in 0..20 {
            town.spawn_building(
                &catalogs,
                60 + i * 3,
                60 + j * 3,
                Rotation::Deg0,
                cottage.id(),
                cottage.preview().clone(),
            )
            .expect("grid layout leaves gaps");
        }
    }
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let handle = town.begin_placement(&catalogs, PlacementTarget::Building(cottage.id()), &mut rng);
    town.move_pending(handle, 122, 90).expect("fresh handle");
    (town, catalogs, handle)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_overlay(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_overlay");
    group.sample_size(50);

    let (mut town, catalogs, _) = settled_town();
    group.bench_function("refresh_400_buildings", |b| {
        b.iter(|| town.refresh_overlay(black_box(&catalogs)));
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_validate");

    let (town, catalogs, handle) = settled_town();
    group.bench_function("validate_pending", |b| {
        b.iter(|| black_box(town.validate_pending(&catalogs, black_box(handle))));
    });

    group.finish();
}

fn bench_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_move");

    let (mut town, _, handle) = settled_town();
    let mut step = 0;
    group.bench_function("move_pending_one_cell", |b| {
        b.iter(|| {
            step = (step + 1) % 2;
            black_box(town.move_pending(handle, 122 + step, 90))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_overlay, bench_validate, bench_move);
criterion_main!(benches);
